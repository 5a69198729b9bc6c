diesel::table! {
    films (id) {
        id -> Int4,
        #[max_length = 250]
        title -> Varchar,
        episode_id -> Int4,
        #[max_length = 250]
        release_date -> Varchar,
        #[max_length = 250]
        director -> Varchar,
        #[max_length = 250]
        producer -> Varchar,
        #[max_length = 250]
        opening_crawl -> Varchar,
        #[max_length = 250]
        url -> Varchar,
    }
}

diesel::table! {
    planets (id) {
        id -> Int4,
        #[max_length = 250]
        name -> Varchar,
        population -> Int4,
        #[max_length = 250]
        climate -> Varchar,
        diameter -> Int4,
        rotation_period -> Int4,
        orbital_period -> Int4,
        #[max_length = 250]
        gravity -> Varchar,
        #[max_length = 250]
        terrain -> Varchar,
        #[max_length = 250]
        url -> Varchar,
    }
}

diesel::table! {
    starships (id) {
        id -> Int4,
        #[max_length = 250]
        name -> Varchar,
        #[max_length = 250]
        model -> Varchar,
        #[max_length = 250]
        starship_class -> Varchar,
        #[max_length = 250]
        manufacturer -> Varchar,
        #[max_length = 250]
        cost_in_credits -> Varchar,
        length -> Int4,
        #[max_length = 250]
        crew -> Varchar,
        #[max_length = 250]
        max_atmosphering_speed -> Varchar,
        #[max_length = 250]
        hyperdrive_rating -> Varchar,
        #[max_length = 250]
        mglt -> Varchar,
        #[max_length = 250]
        cargo_capacity -> Varchar,
        #[max_length = 250]
        consumables -> Varchar,
        #[max_length = 250]
        url -> Varchar,
    }
}

diesel::table! {
    people (id) {
        id -> Int4,
        #[max_length = 250]
        name -> Varchar,
        #[max_length = 250]
        skin_color -> Varchar,
        #[max_length = 250]
        hair_color -> Varchar,
        #[max_length = 250]
        eye_color -> Varchar,
        #[max_length = 250]
        birth_year -> Varchar,
        #[max_length = 250]
        gender -> Varchar,
        #[max_length = 250]
        url -> Varchar,
        height -> Int4,
        mass -> Int4,
        // references planets(name), not their primary key
        #[max_length = 250]
        homeworld -> Nullable<Varchar>,
    }
}

diesel::table! {
    users (id) {
        id -> Int4,
        #[max_length = 250]
        username -> Varchar,
        #[max_length = 250]
        first_name -> Varchar,
        #[max_length = 250]
        last_name -> Varchar,
        #[max_length = 250]
        email -> Varchar,
        #[max_length = 80]
        password -> Varchar,
        is_active -> Bool,
    }
}

diesel::table! {
    favorites (id) {
        id -> Int4,
        user_id -> Int4,
        external_id -> Int4,
        #[max_length = 250]
        name -> Varchar,
        #[max_length = 50]
        kind -> Varchar,
    }
}

diesel::joinable!(favorites -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    favorites,
    films,
    people,
    planets,
    starships,
    users,
);
