use std::str::FromStr;

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::model::FavoriteKind;
use crate::{db, DbPool};

#[derive(Debug, Serialize, Deserialize)]
pub struct NewFavorite {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub external_id: i32,
}

#[get("/user/{user_id}/favorites")]
pub async fn get_favorites(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let favorites = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::favorites_for_user(&mut conn, user_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(favorites))
}

#[get("/favorites/{id}")]
pub async fn get_single_favorite(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let favorite_id = path.into_inner();
    let favorite = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_favorite(&mut conn, favorite_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(favorite))
}

#[post("/user/{user_id}/favorites")]
pub async fn add_favorite(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    payload: web::Json<NewFavorite>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    let payload = payload.into_inner();
    let kind = FavoriteKind::from_str(&payload.kind)
        .map_err(|_| ApiError::UnknownFavoriteType(payload.kind.clone()))?;

    let favorite = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::save_favorite(&mut conn, user_id, payload.name, kind, payload.external_id)
    })
    .await??;

    Ok(HttpResponse::Created().json(favorite))
}

#[delete("/user/{user_id}/favorites/{id}")]
pub async fn delete_favorite(
    pool: web::Data<DbPool>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse> {
    // the path's user id is not matched against the row's owner
    let (_user_id, favorite_id) = path.into_inner();
    web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::delete_favorite(&mut conn, favorite_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json("Favorite deleted successfully"))
}
