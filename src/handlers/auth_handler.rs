use actix_web::{dev::ServiceRequest, Error, HttpMessage, HttpRequest, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

use crate::models::user::Claims;

const SECRET: &[u8] = b"secret";
const TOKEN_TTL_HOURS: i64 = 24;

pub fn issue_jwt(user_id: i32) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        user_id,
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET))
}

pub async fn validate_jwt(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let token_data = decode::<Claims>(
        credentials.token(),
        &DecodingKey::from_secret(SECRET),
        &Validation::default(),
    );

    match token_data {
        Ok(data) => {
            req.extensions_mut().insert(data.claims);
            Ok(req)
        }
        Err(_) => Err((actix_web::error::ErrorUnauthorized("Invalid token"), req)),
    }
}

pub fn decode_jwt(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(SECRET);
    let validation = Validation::new(Algorithm::HS256);
    let token_data: TokenData<Claims> = decode(token, &key, &validation)?;

    Ok(token_data.claims)
}

pub fn extract_user_from_jwt(req: &HttpRequest) -> Result<Claims, HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header_str| header_str.strip_prefix("Bearer "))
        .map(String::from);

    let token = match token {
        Some(t) => t,
        None => return Err(HttpResponse::Unauthorized().body("Missing Authorization token")),
    };

    match decode_jwt(&token) {
        Ok(claims) => Ok(claims),
        Err(_) => Err(HttpResponse::Unauthorized().body("Invalid token")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::test::TestRequest;

    #[test]
    fn issued_token_decodes_to_the_same_user() {
        let token = issue_jwt(1).unwrap();
        let claims = decode_jwt(&token).unwrap();
        assert_eq!(claims.user_id, 1);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_jwt("invalid.token.string").is_err());
    }

    #[actix_web::test]
    async fn extract_user_from_jwt_valid() {
        let token = issue_jwt(7).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let claims = extract_user_from_jwt(&req).unwrap();
        assert_eq!(claims.user_id, 7);
    }

    #[actix_web::test]
    async fn extract_user_from_jwt_missing() {
        let req = TestRequest::default().to_http_request();
        let resp = extract_user_from_jwt(&req).err().unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn extract_user_from_jwt_invalid_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer invalid.token"))
            .to_http_request();

        let resp = extract_user_from_jwt(&req).err().unwrap();
        assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }
}
