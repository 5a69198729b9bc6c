use actix_web::{get, post, web, HttpRequest, HttpResponse};
use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::Result;
use crate::{auth, db, DbPool};

#[derive(Debug, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub csrf_token: String,
}

#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    new_user: web::Json<NewUser>,
) -> Result<HttpResponse> {
    let user = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::save_new_user(&mut conn, new_user.into_inner())
    })
    .await??;

    Ok(HttpResponse::Created().json(user))
}

#[post("/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    settings: web::Data<Settings>,
    login_request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let mut conn = pool
        .get()
        .map_err(|_| anyhow!("Couldn't get db connection from pool."))?;
    let email = login_request.email.clone();
    let password = login_request.password.clone();
    let user = web::block(move || db::login(&mut conn, email, password)).await??;

    let (token, csrf_token) =
        auth::issue_session(user.id, &settings.secret, settings.session_ttl_min)?;

    Ok(HttpResponse::Ok()
        .cookie(auth::session_cookie(token))
        .json(SessionResponse { csrf_token }))
}

#[post("/logout")]
pub async fn logout(req: HttpRequest, settings: web::Data<Settings>) -> HttpResponse {
    if let Some(cookie) = req.cookie(auth::SESSION_COOKIE) {
        match auth::decode_session(cookie.value(), &settings.secret) {
            Ok(claims) => log::info!("user {} logged out", claims.user_id),
            Err(e) => log::info!("discarding invalid session on logout: {}", e),
        }
    }

    HttpResponse::Ok()
        .cookie(auth::removal_cookie())
        .json("Logged out")
}

#[get("/user")]
pub async fn get_users(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let all_users = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::list_users(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(all_users))
}

#[get("/user/{id}")]
pub async fn get_single_user(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let user = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_user(&mut conn, user_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_requires_every_field() {
        let missing_email = r#"{
            "username": "luke",
            "first_name": "Luke",
            "last_name": "Skywalker",
            "password": "red5standingby"
        }"#;
        assert!(serde_json::from_str::<NewUser>(missing_email).is_err());

        let complete = r#"{
            "username": "luke",
            "first_name": "Luke",
            "last_name": "Skywalker",
            "email": "luke@rebellion.example",
            "password": "red5standingby"
        }"#;
        let parsed: NewUser = serde_json::from_str(complete).unwrap();
        assert_eq!(parsed.username, "luke");
    }

    #[test]
    fn login_payload_requires_email_and_password() {
        assert!(serde_json::from_str::<LoginRequest>(r#"{"email": "a@b.c"}"#).is_err());
        let parsed: LoginRequest =
            serde_json::from_str(r#"{"email": "a@b.c", "password": "pw"}"#).unwrap();
        assert_eq!(parsed.email, "a@b.c");
    }
}
