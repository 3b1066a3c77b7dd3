diesel::table! {
    users (id) {
        id -> Integer,
        name -> Text,
        surname -> Text,
        email -> Text,
        birthdate -> Date,
        password -> Text,
        profile_picture -> Text,
        role -> Text,
        banned_until -> Nullable<Timestamp>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    movies (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        genre -> Text,
        year -> Integer,
        poster -> Text,
        video_url -> Text,
        duration -> Integer,
        director -> Text,
        cast -> Text,
        imdb_rating -> Double,
        tmdb_id -> Nullable<Integer>,
        added_by -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    comments (id) {
        id -> Integer,
        user_id -> Integer,
        movie_id -> Integer,
        comment -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    favorites (id) {
        id -> Integer,
        user_id -> Integer,
        movie_id -> Integer,
        created_at -> Timestamp,
    }
}

diesel::table! {
    ratings (id) {
        id -> Integer,
        user_id -> Integer,
        movie_id -> Integer,
        rating -> Integer,
        review -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    reports (id) {
        id -> Integer,
        user_id -> Integer,
        message -> Text,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(movies -> users (added_by));
diesel::joinable!(comments -> users (user_id));
diesel::joinable!(comments -> movies (movie_id));
diesel::joinable!(favorites -> users (user_id));
diesel::joinable!(favorites -> movies (movie_id));
diesel::joinable!(ratings -> users (user_id));
diesel::joinable!(ratings -> movies (movie_id));
diesel::joinable!(reports -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    movies,
    comments,
    favorites,
    ratings,
    reports,
);
