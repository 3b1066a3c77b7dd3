use crate::schema::users;
use auth::Role;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

// To query data from the database
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub password: String,
    pub profile_picture: String,
    pub role: String,
    pub banned_until: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Parse the stored role string. Rows written by this crate always use
    /// `Role::as_str`, so a failure here means hand-edited data.
    pub fn role(&self) -> Result<Role, auth::error::ErrorKind> {
        self.role.parse()
    }
}

// To insert a new user into the database; profile_picture keeps its
// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub birthdate: NaiveDate,
    pub password: &'a str,
    pub role: &'a str,
    pub created_at: NaiveDateTime,
}
