use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use tracing::error;

use crate::gallery::filter_photos;
use crate::handlers::auth_handler::extract_user_from_jwt;
use crate::intake::{persist_photo, IntakeError, SessionContext, MAX_UPLOAD_BYTES};
use crate::store::StoreHandles;
use crate::utils::data_uri::EncodedImage;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUploadRequest {
    pub photo_data_uri: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub tags: String,
}

#[derive(Deserialize)]
pub struct GalleryQuery {
    pub search: Option<String>,
}

#[post("/upload-photo")]
pub async fn upload_photo(
    req: HttpRequest,
    stores: web::Data<StoreHandles>,
    payload: web::Json<PhotoUploadRequest>,
) -> impl Responder {
    let claims = match extract_user_from_jwt(&req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let image = match EncodedImage::parse(&payload.photo_data_uri) {
        Ok(image) => image,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    if image.len() > MAX_UPLOAD_BYTES {
        return HttpResponse::BadRequest().body("Please upload an image smaller than 4MB.");
    }

    let session = SessionContext {
        user_id: claims.user_id,
    };

    match persist_photo(stores.get_ref(), &session, &image, &payload.caption, &payload.tags).await {
        Ok(photo) => HttpResponse::Ok().json(photo),
        Err(e @ IntakeError::Upload(_)) => {
            error!("object upload failed: {e}");
            HttpResponse::BadGateway().body(e.to_string())
        }
        Err(e) => {
            error!("photo upload failed: {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/photos")]
pub async fn get_photos(
    req: HttpRequest,
    stores: web::Data<StoreHandles>,
    query: web::Query<GalleryQuery>,
) -> impl Responder {
    let claims = match extract_user_from_jwt(&req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let photos = match stores.photos.list_for_user(claims.user_id).await {
        Ok(photos) => photos,
        Err(e) => {
            error!("photo listing failed: {e}");
            return HttpResponse::InternalServerError().body("Error fetching photos");
        }
    };

    let search = query.search.as_deref().unwrap_or("");
    HttpResponse::Ok().json(filter_photos(&photos, search))
}
