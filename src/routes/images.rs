/// Image Routes
///
/// The gated read of the shared resource and its ungated write. Only the
/// read side sits behind the access gate.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Deserialize)]
pub struct ImageRequest {
    pub image: String,
}

/// GET /
///
/// Serve one existing image record. Only reachable through the access
/// gate. Which record is returned is unspecified; the query takes the
/// first row the store hands back.
///
/// # Errors
/// - 400: no image stored yet, or storage fault during the lookup
pub async fn get_image(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let row = sqlx::query_as::<_, (String,)>("SELECT image FROM images LIMIT 1")
        .fetch_optional(pool.get_ref())
        .await?;

    match row {
        Some((image,)) => Ok(HttpResponse::Ok().json(json!({
            "response": { "image": image },
            "success": true
        }))),
        None => Ok(HttpResponse::BadRequest().json(json!({
            "response": "No image found",
            "success": false
        }))),
    }
}

/// POST /image
///
/// Store a new image record. No authentication required.
///
/// # Errors
/// - 400: storage fault during the insert
pub async fn upload_image(
    form: web::Json<ImageRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let image_id = Uuid::new_v4();

    sqlx::query("INSERT INTO images (id, image) VALUES ($1, $2)")
        .bind(image_id)
        .bind(&form.image)
        .execute(pool.get_ref())
        .await?;

    tracing::info!(image_id = %image_id, "Image stored");

    Ok(HttpResponse::Created().json(json!({
        "response": { "image": form.image },
        "success": true
    })))
}
