use crate::schema::movies;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text, Timestamp};
use serde::Serialize;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable, Serialize)]
#[diesel(table_name = movies)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub genre: String,
    pub year: i32,
    pub poster: String,
    pub video_url: String,
    pub duration: i32,
    pub director: String,
    pub cast: String,
    pub imdb_rating: f64,
    pub tmdb_id: Option<i32>,
    pub added_by: i32,
    pub created_at: NaiveDateTime,
}

// To insert a new movie into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = movies)]
pub struct NewMovie<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub genre: &'a str,
    pub year: i32,
    pub poster: &'a str,
    pub video_url: &'a str,
    pub duration: i32,
    pub director: &'a str,
    pub cast: &'a str,
    pub imdb_rating: f64,
    pub tmdb_id: Option<i32>,
    pub added_by: i32,
    pub created_at: NaiveDateTime,
}

/// One row of the listing/detail query: the movie joined with the name of
/// whoever added it, plus its aggregated rating figures. `avg_rating` is 0
/// when no ratings exist.
#[derive(Debug, Clone, QueryableByName, Serialize)]
pub struct MovieListing {
    #[diesel(sql_type = Integer)]
    pub id: i32,
    #[diesel(sql_type = Text)]
    pub title: String,
    #[diesel(sql_type = Text)]
    pub description: String,
    #[diesel(sql_type = Text)]
    pub genre: String,
    #[diesel(sql_type = Integer)]
    pub year: i32,
    #[diesel(sql_type = Text)]
    pub poster: String,
    #[diesel(sql_type = Text)]
    pub video_url: String,
    #[diesel(sql_type = Integer)]
    pub duration: i32,
    #[diesel(sql_type = Text)]
    pub director: String,
    #[diesel(sql_type = Text)]
    pub cast: String,
    #[diesel(sql_type = Double)]
    pub imdb_rating: f64,
    #[diesel(sql_type = Nullable<Integer>)]
    pub tmdb_id: Option<i32>,
    #[diesel(sql_type = Integer)]
    pub added_by: i32,
    #[diesel(sql_type = Timestamp)]
    pub created_at: NaiveDateTime,
    #[diesel(sql_type = Text)]
    pub added_by_name: String,
    #[diesel(sql_type = Double)]
    pub avg_rating: f64,
    #[diesel(sql_type = BigInt)]
    pub rating_count: i64,
}
