use crate::schema::comments;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

// To insert a new comment into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewComment<'a> {
    pub user_id: i32,
    pub movie_id: i32,
    pub comment: &'a str,
    pub created_at: NaiveDateTime,
}

/// A comment joined with its author's name, for the detail page.
#[derive(Debug, Clone, Queryable, Serialize)]
pub struct CommentView {
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub surname: String,
}
