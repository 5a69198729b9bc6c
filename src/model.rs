use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::*;

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = films)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Film {
    pub id: i32,
    pub title: String,
    pub episode_id: i32,
    pub release_date: String,
    pub director: String,
    pub producer: String,
    pub opening_crawl: String,
    pub url: String,
}

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = planets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub population: i32,
    pub climate: String,
    pub diameter: i32,
    pub rotation_period: i32,
    pub orbital_period: i32,
    pub gravity: String,
    pub terrain: String,
    pub url: String,
}

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = starships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Starship {
    pub id: i32,
    pub name: String,
    pub model: String,
    pub starship_class: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: i32,
    pub crew: String,
    pub max_atmosphering_speed: String,
    pub hyperdrive_rating: String,
    pub mglt: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub url: String,
}

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub skin_color: String,
    pub hair_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub url: String,
    pub height: i32,
    pub mass: i32,
    pub homeworld: Option<String>,
}

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserRecord {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

/// The closed set of things a user can bookmark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum FavoriteKind {
    People,
    Planets,
    Films,
}

impl FavoriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::People => "People",
            FavoriteKind::Planets => "Planets",
            FavoriteKind::Films => "Films",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FavoriteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "People" => Ok(FavoriteKind::People),
            "Planets" => Ok(FavoriteKind::Planets),
            "Films" => Ok(FavoriteKind::Films),
            other => Err(format!("unknown favorite type: {}", other)),
        }
    }
}

impl ToSql<Text, Pg> for FavoriteKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for FavoriteKind {
    fn from_sql(value: PgValue<'_>) -> deserialize::Result<Self> {
        match value.as_bytes() {
            b"People" => Ok(FavoriteKind::People),
            b"Planets" => Ok(FavoriteKind::Planets),
            b"Films" => Ok(FavoriteKind::Films),
            _ => Err("unknown favorite type in database".into()),
        }
    }
}

#[derive(Debug, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub external_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FavoriteKind,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFavoriteRecord {
    pub user_id: i32,
    pub external_id: i32,
    pub name: String,
    pub kind: FavoriteKind,
}
