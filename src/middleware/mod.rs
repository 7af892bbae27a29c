/// Middleware module
///
/// Custom middleware for authentication and other request-pipeline concerns.

mod auth_middleware;

pub use auth_middleware::AuthMiddleware;
