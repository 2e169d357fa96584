use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenSigner;
use crate::error::AppError;

/// Requires a valid `Authorization: Bearer <token>` header on every request
/// it wraps, and stores the decoded `Claims` in the request extensions.
///
/// Rejections are answered as regular 401 responses rather than service
/// errors, so outer middleware such as CORS still sees them.
#[derive(Clone)]
pub struct AuthMiddleware {
    signer: Arc<TokenSigner>,
}

impl AuthMiddleware {
    pub fn new(signer: Arc<TokenSigner>) -> Self {
        Self { signer }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            signer: self.signer.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    signer: Arc<TokenSigner>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        let claims = match bearer {
            Some(token) => self.signer.verify(token),
            None => Err(AppError::Unauthorized("Missing token".into())),
        };

        match claims {
            Ok(claims) => {
                log::debug!("Authenticated {} for {}", claims.email, req.path());
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req.error_response(app_err).map_into_right_body();
                Box::pin(ready(Ok(response)))
            }
        }
    }
}
