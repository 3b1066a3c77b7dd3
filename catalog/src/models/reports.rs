use crate::schema::reports;
use chrono::NaiveDateTime;
use diesel::prelude::*;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = reports)]
pub struct Report {
    pub id: i32,
    pub user_id: i32,
    pub message: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

// To insert a new report into the database; status keeps its column
// default of "pending".
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub struct NewReport<'a> {
    pub user_id: i32,
    pub message: &'a str,
    pub created_at: NaiveDateTime,
}
