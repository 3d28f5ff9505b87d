use crate::error::MediError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use medi_reminder_domain::ID;
use medi_reminder_infra::MediContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    /// Expiration time as UTC timestamp in seconds
    exp: usize,
    user_id: String,
}

fn parse_authtoken_header(token_header_value: &str) -> &str {
    let token = token_header_value.trim();
    token
        .strip_prefix("Bearer")
        .or_else(|| token.strip_prefix("bearer"))
        .unwrap_or(token)
        .trim()
}

fn decode_user_id(token: &str, secret: &str) -> Result<ID, String> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| format!("Invalid bearer token: {}", e))?;

    token_data
        .claims
        .user_id
        .parse::<ID>()
        .map_err(|e| format!("Malformed user id in bearer token: {}", e))
}

/// Identifies the `User` making the request by the bearer token in the
/// authorization header. Every reminder and notification route is
/// restricted to the resources of this user.
pub fn protect_route(req: &HttpRequest, ctx: &MediContext) -> Result<ID, MediError> {
    let header = req
        .headers()
        .get("authorization")
        .ok_or_else(|| MediError::Unauthorized("Missing authorization header".into()))?;
    let token = header
        .to_str()
        .map(parse_authtoken_header)
        .map_err(|_| MediError::Unauthorized("Malformed authorization header".into()))?;

    decode_user_id(token, &ctx.config.jwt_secret).map_err(MediError::Unauthorized)
}

/// Creates a bearer token for the `User` which is valid until `expires_at`
/// (timestamp in millis)
pub fn issue_token(
    user_id: &ID,
    secret: &str,
    expires_at: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        exp: (expires_at / 1000).max(0) as usize,
        user_id: user_id.to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;

    fn in_one_hour() -> i64 {
        Utc::now().timestamp_millis() + 1000 * 60 * 60
    }

    #[test]
    fn accepts_token_issued_with_same_secret() {
        let ctx = MediContext::create_inmemory();
        let user_id = ID::default();
        let token = issue_token(&user_id, &ctx.config.jwt_secret, in_one_hour()).unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert_eq!(protect_route(&req, &ctx).unwrap(), user_id);
    }

    #[test]
    fn rejects_missing_expired_and_foreign_tokens() {
        let ctx = MediContext::create_inmemory();
        let user_id = ID::default();

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).is_err());

        let foreign = issue_token(&user_id, "some-other-secret", in_one_hour()).unwrap();
        let expired = issue_token(
            &user_id,
            &ctx.config.jwt_secret,
            Utc::now().timestamp_millis() - 1000 * 60 * 60,
        )
        .unwrap();
        for token in [foreign, expired] {
            let req = TestRequest::default()
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .to_http_request();
            assert!(matches!(
                protect_route(&req, &ctx),
                Err(MediError::Unauthorized(_))
            ));
        }
    }
}
