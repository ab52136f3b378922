use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use crate::handlers::auth_handler::extract_user_from_jwt;
use crate::transform;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub photo_id: String,
    pub style: String,
}

#[post("/transform-photo")]
pub async fn transform_photo(
    req: HttpRequest,
    payload: web::Json<TransformRequest>,
) -> impl Responder {
    if let Err(resp) = extract_user_from_jwt(&req) {
        return resp;
    }

    match transform::transform_photo(&payload.photo_id, &payload.style).await {
        Ok(url) => HttpResponse::Ok().json(serde_json::json!({ "transformedImageUrl": url })),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}
