use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use sqlx::PgPool;
use std::net::TcpListener;

use crate::logger::RequestLogger;
use crate::middleware::AuthMiddleware;
use crate::routes::{get_image, health_check, login, signup, upload_image};

pub fn run(listener: TcpListener, connection: PgPool) -> Result<Server, std::io::Error> {
    let pool = connection.clone();
    let connection = web::Data::new(connection);

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(RequestLogger)

            // Shared state
            .app_data(connection.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))

            // Public routes (no authentication required)
            .route("/health_check", web::get().to(health_check))
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/image", web::post().to(upload_image))

            // Protected route (requires a valid access token)
            .service(
                web::resource("/")
                    .wrap(AuthMiddleware::new(pool.clone()))
                    .route(web::get().to(get_image)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Body deserialization failures use the same envelope as every other
/// 400 on this API.
fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(serde_json::json!({
        "response": err.to_string(),
        "success": false
    }));
    actix_web::error::InternalError::from_response(err, response).into()
}
