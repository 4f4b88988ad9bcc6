use actix_web::http::header;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::env::TOKEN_SECRET_KEY;
use crate::error_code::BackendError;
use crate::error_code::BackendError::Authorization;
use crate::utils::time::{now_millis, DAY1};

//settlement is service-to-service only, the claim names the calling
//service rather than an end user
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Claims {
    caller: String,
    iat: u64,
    exp: u64,
}

impl Claims {
    pub fn new(caller: &str, iat: u64, exp: u64) -> Self {
        Self {
            caller: caller.to_owned(),
            iat,
            exp,
        }
    }
}

pub fn create_service_jwt(caller: &str) -> String {
    let iat = now_millis();
    let exp = iat + DAY1;

    let claims = Claims::new(caller, iat, exp);

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TOKEN_SECRET_KEY.as_bytes()),
    )
    .unwrap()
}

fn validate_jwt(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(TOKEN_SECRET_KEY.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

pub fn validate_service_credentials(req: &HttpRequest) -> Result<String, BackendError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(Authorization("No Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_err| Authorization("Token is invalid".to_string()))?;
    if auth_str.starts_with("bearer ") || auth_str.starts_with("Bearer ") {
        let token = &auth_str["bearer ".len()..];
        let claim_dat = validate_jwt(token)
            .map_err(|_err| Authorization("Invalid token signature".to_string()))?;
        if now_millis() > claim_dat.exp {
            Err(Authorization("Token has expired.".to_string()))?
        } else {
            Ok(claim_dat.caller)
        }
    } else {
        Err(Authorization("Token is invalid or malformed".to_string()))?
    }
}
