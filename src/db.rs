use anyhow::anyhow;
use bcrypt::{hash, verify, DEFAULT_COST};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{
    ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl, SelectableHelper,
};

use crate::error::ApiError;
use crate::model::{
    Favorite, FavoriteKind, Film, NewFavoriteRecord, NewUserRecord, Person, Planet, Starship, User,
};
use crate::users::NewUser;

pub fn list_people(conn: &mut PgConnection) -> Result<Vec<Person>, ApiError> {
    use crate::schema::people::dsl::*;
    people
        .order(id.asc())
        .select(Person::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_person(conn: &mut PgConnection, person_id: i32) -> Result<Person, ApiError> {
    use crate::schema::people::dsl::*;
    people
        .filter(id.eq(person_id))
        .select(Person::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("character"))
}

pub fn list_films(conn: &mut PgConnection) -> Result<Vec<Film>, ApiError> {
    use crate::schema::films::dsl::*;
    films
        .order(id.asc())
        .select(Film::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_film(conn: &mut PgConnection, film_id: i32) -> Result<Film, ApiError> {
    use crate::schema::films::dsl::*;
    films
        .filter(id.eq(film_id))
        .select(Film::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("film"))
}

pub fn list_planets(conn: &mut PgConnection) -> Result<Vec<Planet>, ApiError> {
    use crate::schema::planets::dsl::*;
    planets
        .order(id.asc())
        .select(Planet::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_planet(conn: &mut PgConnection, planet_id: i32) -> Result<Planet, ApiError> {
    use crate::schema::planets::dsl::*;
    planets
        .filter(id.eq(planet_id))
        .select(Planet::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("planet"))
}

pub fn list_starships(conn: &mut PgConnection) -> Result<Vec<Starship>, ApiError> {
    use crate::schema::starships::dsl::*;
    starships
        .order(id.asc())
        .select(Starship::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_starship(conn: &mut PgConnection, starship_id: i32) -> Result<Starship, ApiError> {
    use crate::schema::starships::dsl::*;
    starships
        .filter(id.eq(starship_id))
        .select(Starship::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("starship"))
}

pub fn list_users(conn: &mut PgConnection) -> Result<Vec<User>, ApiError> {
    use crate::schema::users::dsl::*;
    users
        .order(id.asc())
        .select(User::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_user(conn: &mut PgConnection, lookup_id: i32) -> Result<User, ApiError> {
    use crate::schema::users::dsl::*;
    users
        .filter(id.eq(lookup_id))
        .select(User::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("user"))
}

pub fn save_new_user(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
    use crate::schema::users::dsl::*;

    let taken: i64 = users
        .filter(username.eq(new_user.username.clone()))
        .count()
        .get_result(conn)
        .map_err(|e| anyhow!("{}", e))?;
    if taken > 0 {
        return Err(ApiError::UsernameTaken);
    }

    let taken: i64 = users
        .filter(email.eq(new_user.email.clone()))
        .count()
        .get_result(conn)
        .map_err(|e| anyhow!("{}", e))?;
    if taken > 0 {
        return Err(ApiError::EmailNotAvailable);
    }

    let hashed_password = hash(new_user.password, DEFAULT_COST)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let record = NewUserRecord {
        username: new_user.username,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        email: new_user.email,
        password: hashed_password,
        is_active: true,
    };

    diesel::insert_into(users)
        .values(record)
        .get_result::<User>(conn)
        .map_err(map_user_insert_error)
}

// A concurrent register can slip past the availability checks; the unique
// constraints settle it, and the loser still gets the conflict error.
fn map_user_insert_error(e: DieselError) -> ApiError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            if info
                .constraint_name()
                .map_or(false, |c| c.contains("email"))
            {
                ApiError::EmailNotAvailable
            } else {
                ApiError::UsernameTaken
            }
        }
        e => anyhow!("{}", e).into(),
    }
}

pub fn login(
    conn: &mut PgConnection,
    email_login: String,
    password_login: String,
) -> Result<User, ApiError> {
    use crate::schema::users::dsl::*;

    let user = users
        .filter(email.eq(email_login))
        .select(User::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::InvalidCredentials)?;

    let matches = verify(password_login, &user.password)
        .map_err(|e| anyhow!("Failed to verify password: {}", e))?;
    if !matches {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(user)
}

pub fn favorites_for_user(conn: &mut PgConnection, owner_id: i32) -> Result<Vec<Favorite>, ApiError> {
    use crate::schema::favorites::dsl::*;
    favorites
        .filter(user_id.eq(owner_id))
        .order(id.asc())
        .select(Favorite::as_select())
        .load(conn)
        .map_err(|e| anyhow!("{}", e).into())
}

pub fn find_favorite(conn: &mut PgConnection, favorite_id: i32) -> Result<Favorite, ApiError> {
    use crate::schema::favorites::dsl::*;
    favorites
        .filter(id.eq(favorite_id))
        .select(Favorite::as_select())
        .first(conn)
        .optional()
        .map_err(|e| anyhow!("{}", e))?
        .ok_or(ApiError::NotFound("favorite"))
}

pub fn save_favorite(
    conn: &mut PgConnection,
    owner_id: i32,
    favorite_name: String,
    favorite_kind: FavoriteKind,
    target_id: i32,
) -> Result<Favorite, ApiError> {
    use crate::schema::favorites::dsl::*;

    // uniqueness is global, not per user
    let existing: i64 = favorites
        .filter(name.eq(favorite_name.clone()))
        .count()
        .get_result(conn)
        .map_err(|e| anyhow!("{}", e))?;
    if existing > 0 {
        return Err(ApiError::AlreadyFavorited);
    }

    let record = NewFavoriteRecord {
        user_id: owner_id,
        external_id: target_id,
        name: favorite_name,
        kind: favorite_kind,
    };

    diesel::insert_into(favorites)
        .values(record)
        .get_result::<Favorite>(conn)
        .map_err(map_favorite_insert_error)
}

fn map_favorite_insert_error(e: DieselError) -> ApiError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ApiError::AlreadyFavorited
        }
        e => anyhow!("{}", e).into(),
    }
}

// The caller's user id is deliberately not checked against the row; deletion
// is keyed by favorite id alone, mirroring the documented interface quirk.
pub fn delete_favorite(conn: &mut PgConnection, favorite_id: i32) -> Result<(), ApiError> {
    use crate::schema::favorites::dsl::*;

    let deleted = diesel::delete(favorites.filter(id.eq(favorite_id)))
        .execute(conn)
        .map_err(|e| anyhow!("{}", e))?;
    if deleted == 0 {
        return Err(ApiError::NotFound("favorite"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use diesel::Connection;

    use super::*;

    #[test]
    fn stored_hash_verifies_only_the_original_password() {
        let hashed = hash("correct horse battery staple", DEFAULT_COST).unwrap();
        assert!(verify("correct horse battery staple", &hashed).unwrap());
        assert!(!verify("incorrect horse", &hashed).unwrap());
    }

    #[test]
    fn user_unique_violation_maps_to_a_conflict_error() {
        let violation = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        );
        assert!(matches!(
            map_user_insert_error(violation),
            ApiError::UsernameTaken
        ));

        let other = DieselError::NotFound;
        assert!(matches!(
            map_user_insert_error(other),
            ApiError::InternalError(_)
        ));
    }

    #[test]
    fn favorite_unique_violation_maps_to_already_favourited() {
        let violation = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        );
        assert!(matches!(
            map_favorite_insert_error(violation),
            ApiError::AlreadyFavorited
        ));
    }

    // Tests below run against a live postgres named by DATABASE_URL. Every
    // change is rolled back with the test transaction.
    fn test_connection() -> PgConnection {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.");
        let mut conn = PgConnection::establish(&url).expect("Failed to connect to database.");
        conn.begin_test_transaction()
            .expect("Failed to begin test transaction.");
        conn
    }

    fn register(conn: &mut PgConnection, username: &str, email: &str) -> User {
        save_new_user(
            conn,
            NewUser {
                username: username.to_string(),
                first_name: "Test".to_string(),
                last_name: "Pilot".to_string(),
                email: email.to_string(),
                password: "red5standingby".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    #[ignore = "needs a live postgres via DATABASE_URL"]
    fn favorite_names_are_unique_across_users() {
        let mut conn = test_connection();
        let first = register(&mut conn, "han", "han@falcon.example");
        let second = register(&mut conn, "chewie", "chewie@falcon.example");

        save_favorite(
            &mut conn,
            first.id,
            "Kashyyyk".to_string(),
            FavoriteKind::Planets,
            14,
        )
        .unwrap();

        // the same name from a different user is still a conflict
        let err = save_favorite(
            &mut conn,
            second.id,
            "Kashyyyk".to_string(),
            FavoriteKind::Planets,
            14,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyFavorited));
        assert_eq!(favorites_for_user(&mut conn, second.id).unwrap().len(), 0);
    }

    #[test]
    #[ignore = "needs a live postgres via DATABASE_URL"]
    fn delete_succeeds_without_checking_ownership() {
        let mut conn = test_connection();
        let owner = register(&mut conn, "lando", "lando@bespin.example");
        let other = register(&mut conn, "lobot", "lobot@bespin.example");

        let favorite = save_favorite(
            &mut conn,
            owner.id,
            "Cloud City".to_string(),
            FavoriteKind::Planets,
            6,
        )
        .unwrap();

        // the caller's id never reaches the delete, so another user's row
        // can be removed; `other` stands in for the path user_id the
        // handler discards
        assert_ne!(other.id, owner.id);
        delete_favorite(&mut conn, favorite.id).unwrap();
        assert!(matches!(
            find_favorite(&mut conn, favorite.id).unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    #[ignore = "needs a live postgres via DATABASE_URL"]
    fn register_rejects_duplicate_username_and_email() {
        let mut conn = test_connection();
        register(&mut conn, "wedge", "wedge@rogue.example");

        let err = save_new_user(
            &mut conn,
            NewUser {
                username: "wedge".to_string(),
                first_name: "Other".to_string(),
                last_name: "Pilot".to_string(),
                email: "other@rogue.example".to_string(),
                password: "pw".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::UsernameTaken));

        let err = save_new_user(
            &mut conn,
            NewUser {
                username: "other".to_string(),
                first_name: "Other".to_string(),
                last_name: "Pilot".to_string(),
                email: "wedge@rogue.example".to_string(),
                password: "pw".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::EmailNotAvailable));

        let usernames: Vec<String> = list_users(&mut conn)
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(usernames.iter().filter(|u| *u == "wedge").count(), 1);
        assert!(!usernames.contains(&"other".to_string()));
    }
}
