use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use tracing::error;

use crate::handlers::auth_handler::extract_user_from_jwt;
use crate::intake::MAX_UPLOAD_BYTES;
use crate::store::StoreHandles;
use crate::utils::data_uri::EncodedImage;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequestBody {
    pub photo_data_uri: String,
}

#[post("/generate-caption")]
pub async fn generate_caption(
    req: HttpRequest,
    stores: web::Data<StoreHandles>,
    payload: web::Json<CaptionRequestBody>,
) -> impl Responder {
    if let Err(resp) = extract_user_from_jwt(&req) {
        return resp;
    }

    let image = match EncodedImage::parse(&payload.photo_data_uri) {
        Ok(image) => image,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };

    if image.len() > MAX_UPLOAD_BYTES {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Please upload an image smaller than 4MB."
        }));
    }

    match stores.captions.generate_caption(&image).await {
        Ok(caption) => HttpResponse::Ok().json(serde_json::json!({ "caption": caption })),
        Err(e) => {
            error!("caption generation failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Failed to generate caption. Please try again."
            }))
        }
    }
}
