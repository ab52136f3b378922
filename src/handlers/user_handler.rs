use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use tracing::error;

use crate::handlers::auth_handler::{extract_user_from_jwt, issue_jwt};
use crate::models::user::{LoginRequest, User, UserCreateRequest};

#[post("/signup")]
pub async fn signup(
    db: web::Data<PgPool>,
    payload: web::Json<UserCreateRequest>,
) -> impl Responder {
    let hashed = match bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(e) => {
            error!("password hashing failed: {e}");
            return HttpResponse::InternalServerError().body("Failed to create account");
        }
    };

    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING id, name, email, password_hash",
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&hashed)
    .fetch_one(db.get_ref())
    .await;

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            error!("user insert failed: {e}");
            return HttpResponse::InternalServerError().body("Failed to create account");
        }
    };

    match issue_jwt(user.id) {
        Ok(token) => HttpResponse::Ok().json(serde_json::json!({ "token": token })),
        Err(e) => {
            error!("token issue failed: {e}");
            HttpResponse::InternalServerError().body("Failed to create account")
        }
    }
}

#[post("/signin")]
pub async fn signin(db: web::Data<PgPool>, payload: web::Json<LoginRequest>) -> impl Responder {
    let result = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash FROM users WHERE email = $1",
    )
    .bind(&payload.email)
    .fetch_optional(db.get_ref())
    .await;

    let user = match result {
        Ok(Some(user)) => user,
        Ok(None) => return HttpResponse::Unauthorized().body("Invalid email or password"),
        Err(e) => {
            error!("user lookup failed: {e}");
            return HttpResponse::InternalServerError().body("Internal Server Error");
        }
    };

    match bcrypt::verify(&payload.password, &user.password_hash) {
        Ok(true) => match issue_jwt(user.id) {
            Ok(token) => HttpResponse::Ok().json(serde_json::json!({ "token": token })),
            Err(e) => {
                error!("token issue failed: {e}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        },
        Ok(false) => HttpResponse::Unauthorized().body("Invalid email or password"),
        Err(e) => {
            error!("password verify failed: {e}");
            HttpResponse::InternalServerError().body("Internal Server Error")
        }
    }
}

#[get("/me")]
pub async fn me(req: HttpRequest, db: web::Data<PgPool>) -> impl Responder {
    let claims = match extract_user_from_jwt(&req) {
        Ok(claims) => claims,
        Err(resp) => return resp,
    };

    let result = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash FROM users WHERE id = $1",
    )
    .bind(claims.user_id)
    .fetch_optional(db.get_ref())
    .await;

    match result {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => HttpResponse::NotFound().body("User not found"),
        Err(e) => {
            error!("user lookup failed: {e}");
            HttpResponse::InternalServerError().body("Internal Server Error")
        }
    }
}
