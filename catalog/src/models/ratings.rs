use crate::schema::ratings;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = ratings)]
pub struct Rating {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: i32,
    pub review: String,
    pub created_at: NaiveDateTime,
}

// To insert a new rating into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ratings)]
pub struct NewRating<'a> {
    pub user_id: i32,
    pub movie_id: i32,
    pub rating: i32,
    pub review: &'a str,
    pub created_at: NaiveDateTime,
}

/// A written review joined with its author's name, for the detail page.
/// Ratings with an empty review never show up here.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct ReviewView {
    pub rating: i32,
    pub review: String,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub surname: String,
}

/// The session user's own rating of a movie, used to prefill the form.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct UserRating {
    pub rating: i32,
    pub review: String,
}
