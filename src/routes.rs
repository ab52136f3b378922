use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

use crate::handlers::auth_handler::validate_jwt;
use crate::handlers::caption_handler::generate_caption;
use crate::handlers::photo_handler::{get_photos, upload_photo};
use crate::handlers::transform_handler::transform_photo;
use crate::handlers::user_handler::{me, signin, signup};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(signup).service(signin).service(
        web::scope("")
            .wrap(HttpAuthentication::bearer(validate_jwt))
            .service(me)
            .service(generate_caption)
            .service(upload_photo)
            .service(get_photos)
            .service(transform_photo),
    );
}
