use actix_web::middleware::Logger;
use actix_web::{get, web, App, HttpServer, Responder};
use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use dotenvy::dotenv;
use env_logger::Env;
use r2d2::Pool;

use crate::config::Settings;

mod auth;
mod catalog;
mod config;
mod db;
mod error;
mod favorites;
mod model;
mod schema;
mod users;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::load().expect("Failed to load settings.");
    let manager = ConnectionManager::<PgConnection>::new(&settings.database_url);
    let pool = Pool::builder()
        .build(manager)
        .expect("Failed to create pool.");

    let bind_addr = (settings.host.clone(), settings.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(settings.clone()))
            .service(index)
            .service(catalog::get_all_characters)
            .service(catalog::get_single_character)
            .service(catalog::get_films)
            .service(catalog::get_single_film)
            .service(catalog::get_planets)
            .service(catalog::get_single_planet)
            .service(catalog::get_starships)
            .service(catalog::get_single_starship)
            .service(users::get_users)
            .service(users::get_single_user)
            .service(users::register)
            .service(users::login)
            .service(users::logout)
            .service(favorites::get_favorites)
            .service(favorites::get_single_favorite)
            .service(favorites::add_favorite)
            .service(favorites::delete_favorite)
    })
    .bind(bind_addr)?
    .run()
    .await
}

#[get("/")]
async fn index() -> impl Responder {
    "Star Wars reference API"
}
