use sqlx::FromRow;

/// A registered user, as stored in the `users` table.
///
/// Not `Serialize`: the hash must never appear in a response.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub email: String,
    pub hashed_password: String,
}

impl User {
    pub fn new(email: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            hashed_password: hashed_password.into(),
        }
    }
}
