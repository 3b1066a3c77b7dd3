use crate::schema::favorites;
use chrono::NaiveDateTime;
use diesel::prelude::*;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = favorites)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub created_at: NaiveDateTime,
}

// To insert a new favorite into the database
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavorite {
    pub user_id: i32,
    pub movie_id: i32,
    pub created_at: NaiveDateTime,
}

/// Outcome of a favorite toggle.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    pub fn is_favorite(&self) -> bool {
        matches!(self, Self::Added)
    }
}
