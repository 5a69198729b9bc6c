use actix_web::{get, web, HttpResponse};

use crate::error::Result;
use crate::{db, DbPool};

#[get("/characters")]
pub async fn get_all_characters(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let all_characters = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::list_people(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(all_characters))
}

#[get("/characters/{id}")]
pub async fn get_single_character(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let character_id = path.into_inner();
    let character = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_person(&mut conn, character_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(character))
}

#[get("/films")]
pub async fn get_films(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let all_films = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::list_films(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(all_films))
}

#[get("/films/{id}")]
pub async fn get_single_film(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let film_id = path.into_inner();
    let film = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_film(&mut conn, film_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(film))
}

#[get("/planets")]
pub async fn get_planets(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let all_planets = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::list_planets(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(all_planets))
}

#[get("/planets/{id}")]
pub async fn get_single_planet(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let planet_id = path.into_inner();
    let planet = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_planet(&mut conn, planet_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(planet))
}

#[get("/starships")]
pub async fn get_starships(pool: web::Data<DbPool>) -> Result<HttpResponse> {
    let all_starships = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::list_starships(&mut conn)
    })
    .await??;

    Ok(HttpResponse::Ok().json(all_starships))
}

#[get("/starships/{id}")]
pub async fn get_single_starship(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let starship_id = path.into_inner();
    let starship = web::block(move || {
        let mut conn = pool.get().expect("Couldn't get db connection from pool.");
        db::find_starship(&mut conn, starship_id)
    })
    .await??;

    Ok(HttpResponse::Ok().json(starship))
}
