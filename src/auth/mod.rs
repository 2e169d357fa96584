pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedEmail;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenSigner};

/// Payload for both signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. Any non-empty string is accepted.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response after a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub email: String,
    /// The bearer token for the session.
    pub token: String,
}
