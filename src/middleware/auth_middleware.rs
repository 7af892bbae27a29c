/// Access Gate Middleware
///
/// Runs before protected routes. Reads the raw `Authorization` header value
/// as the access token (no scheme prefix) and resolves it against the
/// credential store. Unknown or missing token halts the pipeline with the
/// 401 envelope; a storage fault halts it with the 400 envelope so the two
/// failure kinds stay distinguishable.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    Error,
};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::rc::Rc;

use crate::auth::authenticate;
use crate::error::{AppError, AuthError};

/// Token-gate middleware for protected routes
///
/// Must be applied to every route that serves the shared resource.
pub struct AuthMiddleware {
    pool: PgPool,
}

impl AuthMiddleware {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            pool: self.pool.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    pool: PgPool,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The header value is the token itself, no "Bearer " parsing.
        let presented_token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(|h| h.to_string());

        let pool = self.pool.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let token = match presented_token {
                Some(token) => token,
                None => {
                    tracing::warn!("Missing Authorization header on gated route");
                    return Err(reject(AppError::Auth(AuthError::NotLoggedIn)));
                }
            };

            match authenticate(&pool, &token).await {
                Ok(user) => {
                    tracing::debug!(
                        user_id = %user.id,
                        username = %user.username,
                        "Access token accepted"
                    );
                    service.call(req).await
                }
                Err(e) => Err(reject(e)),
            }
        })
    }
}

/// Halt the pipeline, rendering the error through its envelope mapping.
fn reject(err: AppError) -> Error {
    let response = err.error_response();
    actix_web::error::InternalError::from_response(err, response).into()
}
