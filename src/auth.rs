use actix_web::cookie::{Cookie, SameSite};
use anyhow::anyhow;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub exp: i64,
    pub iss: String,
    pub sub: String,
    pub user_id: i32,
    pub csrf: String,
}

/// Signs a session token for the user and returns it together with the CSRF
/// token embedded in its claims.
pub fn issue_session(user_id: i32, secret: &str, ttl_min: i64) -> anyhow::Result<(String, String)> {
    let header = Header::new(Algorithm::HS256);
    let expiration = chrono::Utc::now() + chrono::Duration::minutes(ttl_min);
    let csrf = Uuid::new_v4().to_string();
    let claims = SessionClaims {
        exp: expiration.timestamp(),
        iss: "StarwarsBackend".to_string(),
        sub: "StarwarsClient".to_string(),
        user_id,
        csrf: csrf.clone(),
    };
    let token = encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| anyhow!("{}", e))?;

    Ok((token, csrf))
}

pub fn decode_session(token: &str, secret: &str) -> anyhow::Result<SessionClaims> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie that instructs the browser to drop the session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}
