// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;
pub mod filters;
pub mod models;
pub mod schema;
pub mod setup;

use crate::error::ErrorKind;
use crate::filters::MovieFilters;
use crate::models::{
    CommentView, FavoriteToggle, MovieListing, NewComment, NewFavorite, NewMovie, NewRating,
    NewReport, NewUser, ReviewView, User, UserRating,
};
use crate::schema::{comments, favorites, movies, ratings, reports, users};
use anyhow::{anyhow, Error};
use auth::Role;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::connection::SimpleConnection;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Double, Integer, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};

pub fn establish_connection(path: &str) -> Result<SqliteConnection, Error> {
    let mut conn = SqliteConnection::establish(path)?;
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
    Ok(conn)
}

/// The shared SELECT of the listing and detail queries: every movie column,
/// the submitter's name, and the aggregated rating figures. Filters append
/// predicates with `?` placeholders only, values are always bound.
const LISTING_SELECT: &str = r#"
SELECT m.id, m.title, m.description, m.genre, m.year, m.poster, m.video_url,
       m.duration, m.director, m."cast" AS "cast", m.imdb_rating, m.tmdb_id,
       m.added_by, m.created_at,
       u.name AS added_by_name,
       COALESCE(AVG(r.rating), 0.0) AS avg_rating,
       COUNT(r.rating) AS rating_count
FROM movies m
JOIN users u ON m.added_by = u.id
LEFT JOIN ratings r ON m.id = r.movie_id
"#;

pub struct CatalogController {
    conn: SqliteConnection,
}

impl CatalogController {
    pub fn with_path(path: &str) -> Result<Self, Error> {
        let conn = establish_connection(path)?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn init_schema(&mut self) -> Result<(), Error> {
        setup::init_schema(&mut self.conn)
    }

    /// Create the well-known development admin account unless it already
    /// exists. Returns whether a row was inserted. Only ever called behind
    /// the `seed_admin` configuration guard.
    pub fn seed_dev_admin(&mut self, now: NaiveDateTime) -> Result<bool, Error> {
        let existing = diesel::select(exists(
            users::table.filter(users::email.eq(setup::ADMIN_EMAIL)),
        ))
        .get_result::<bool>(&mut self.conn)?;

        if existing {
            return Ok(false);
        }

        let hashed = auth::password::hash(setup::ADMIN_PASSWORD)?;
        let birthdate =
            NaiveDate::from_ymd_opt(1990, 1, 1).ok_or_else(|| anyhow!("invalid seed birthdate"))?;

        diesel::insert_into(users::table)
            .values(&NewUser {
                name: "Admin",
                surname: "User",
                email: setup::ADMIN_EMAIL,
                birthdate,
                password: &hashed,
                role: Role::Admin.as_str(),
                created_at: now,
            })
            .execute(&mut self.conn)?;

        Ok(true)
    }

    // === Users ===

    /// Insert a new user, refusing duplicate emails. The email is also
    /// UNIQUE at the schema level, the check here just produces a friendly
    /// error instead of a constraint violation.
    pub fn create_user(&mut self, new_user: &NewUser) -> Result<i32, Error> {
        self.conn.transaction::<_, Error, _>(|conn| {
            let taken = diesel::select(exists(
                users::table.filter(users::email.eq(new_user.email)),
            ))
            .get_result::<bool>(conn)?;

            if taken {
                return Err(ErrorKind::EmailTaken(new_user.email.to_owned()).into());
            }

            let id = diesel::insert_into(users::table)
                .values(new_user)
                .returning(users::id)
                .get_result::<i32>(conn)?;

            Ok(id)
        })
    }

    /// Set or clear a user's ban expiry. Not exposed over HTTP, this backs
    /// the moderation tooling.
    pub fn ban_user(&mut self, user_id: i32, until: Option<NaiveDateTime>) -> Result<(), Error> {
        diesel::update(users::table.find(user_id))
            .set(users::banned_until.eq(until))
            .execute(&mut self.conn)?;

        Ok(())
    }

    pub fn user_by_email(&mut self, email: &str) -> Result<Option<User>, Error> {
        let user = users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut self.conn)
            .optional()?;

        Ok(user)
    }

    // === Movies ===

    pub fn create_movie(&mut self, new_movie: &NewMovie) -> Result<i32, Error> {
        let id = diesel::insert_into(movies::table)
            .values(new_movie)
            .returning(movies::id)
            .get_result::<i32>(&mut self.conn)?;

        Ok(id)
    }

    /// Filtered listing, newest first, capped at 20 rows. The rating
    /// threshold is a HAVING clause so it applies to the aggregated
    /// average, not to individual ratings.
    pub fn list_movies(&mut self, filters: &MovieFilters) -> Result<Vec<MovieListing>, Error> {
        let mut query = sql_query(LISTING_SELECT).into_boxed::<Sqlite>().sql("WHERE 1=1");

        if let Some(search) = filters.search.as_deref() {
            let pattern = format!("%{}%", search);
            query = query
                .sql(" AND (m.title LIKE ? OR m.description LIKE ? OR m.director LIKE ? OR m.\"cast\" LIKE ?)")
                .bind::<Text, _>(pattern.clone())
                .bind::<Text, _>(pattern.clone())
                .bind::<Text, _>(pattern.clone())
                .bind::<Text, _>(pattern);
        }

        if let Some(genre) = filters.genre.as_deref() {
            query = query
                .sql(" AND m.genre LIKE ?")
                .bind::<Text, _>(format!("%{}%", genre));
        }

        if let Some(year) = filters.year {
            query = query.sql(" AND m.year = ?").bind::<Integer, _>(year);
        }

        query = query.sql(" GROUP BY m.id");

        if let Some(min_rating) = filters.min_rating {
            query = query
                .sql(" HAVING avg_rating >= ?")
                .bind::<Double, _>(min_rating);
        }

        let listing = query
            .sql(" ORDER BY m.created_at DESC LIMIT 20")
            .load::<MovieListing>(&mut self.conn)?;

        Ok(listing)
    }

    /// A single movie with the same aggregation as the listing, or `None`
    /// when the id doesn't exist.
    pub fn movie_with_stats(&mut self, movie_id: i32) -> Result<Option<MovieListing>, Error> {
        let rows = sql_query(format!("{} WHERE m.id = ? GROUP BY m.id", LISTING_SELECT))
            .bind::<Integer, _>(movie_id)
            .load::<MovieListing>(&mut self.conn)?;

        Ok(rows.into_iter().next())
    }

    pub fn distinct_genres(&mut self) -> Result<Vec<String>, Error> {
        let genres = movies::table
            .select(movies::genre)
            .distinct()
            .order(movies::genre.asc())
            .load::<String>(&mut self.conn)?;

        Ok(genres)
    }

    pub fn distinct_years(&mut self) -> Result<Vec<i32>, Error> {
        let years = movies::table
            .select(movies::year)
            .distinct()
            .order(movies::year.desc())
            .load::<i32>(&mut self.conn)?;

        Ok(years)
    }

    /// Delete a movie together with every comment, favorite and rating that
    /// references it, all-or-nothing. Returns the title for the
    /// confirmation message.
    pub fn delete_movie_cascade(&mut self, movie_id: i32) -> Result<String, Error> {
        self.conn
            .transaction::<_, Error, _>(|conn| cascade_delete(conn, movie_id))
    }

    // === Comments ===

    pub fn create_comment(
        &mut self,
        user_id: i32,
        movie_id: i32,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<(), Error> {
        diesel::insert_into(comments::table)
            .values(&NewComment {
                user_id,
                movie_id,
                comment: text,
                created_at: now,
            })
            .execute(&mut self.conn)?;

        Ok(())
    }

    pub fn comments_for_movie(&mut self, movie_id: i32) -> Result<Vec<CommentView>, Error> {
        let comments = comments::table
            .inner_join(users::table)
            .filter(comments::movie_id.eq(movie_id))
            .order(comments::created_at.desc())
            .select((
                comments::comment,
                comments::created_at,
                users::name,
                users::surname,
            ))
            .load::<CommentView>(&mut self.conn)?;

        Ok(comments)
    }

    // === Ratings ===

    /// Written reviews for the detail page, newest first. Ratings whose
    /// review text is empty are skipped.
    pub fn reviews_for_movie(&mut self, movie_id: i32) -> Result<Vec<ReviewView>, Error> {
        let reviews = ratings::table
            .inner_join(users::table)
            .filter(ratings::movie_id.eq(movie_id))
            .filter(ratings::review.ne(""))
            .order(ratings::created_at.desc())
            .select((
                ratings::rating,
                ratings::review,
                ratings::created_at,
                users::name,
                users::surname,
            ))
            .load::<ReviewView>(&mut self.conn)?;

        Ok(reviews)
    }

    pub fn user_rating(&mut self, user_id: i32, movie_id: i32) -> Result<Option<UserRating>, Error> {
        let rating = ratings::table
            .filter(ratings::user_id.eq(user_id))
            .filter(ratings::movie_id.eq(movie_id))
            .select((ratings::rating, ratings::review))
            .first::<UserRating>(&mut self.conn)
            .optional()?;

        Ok(rating)
    }

    /// Insert or wholesale-replace the rating for this (user, movie) pair.
    /// The bounds check runs before anything touches storage.
    pub fn upsert_rating(
        &mut self,
        user_id: i32,
        movie_id: i32,
        rating: i32,
        review: &str,
        now: NaiveDateTime,
    ) -> Result<(), Error> {
        if !(1..=5).contains(&rating) {
            return Err(ErrorKind::RatingOutOfRange(rating).into());
        }

        diesel::insert_into(ratings::table)
            .values(&NewRating {
                user_id,
                movie_id,
                rating,
                review,
                created_at: now,
            })
            .on_conflict((ratings::user_id, ratings::movie_id))
            .do_update()
            .set((
                ratings::rating.eq(rating),
                ratings::review.eq(review),
                ratings::created_at.eq(now),
            ))
            .execute(&mut self.conn)?;

        Ok(())
    }

    // === Favorites ===

    pub fn is_favorite(&mut self, user_id: i32, movie_id: i32) -> Result<bool, Error> {
        let found = diesel::select(exists(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::movie_id.eq(movie_id)),
        ))
        .get_result::<bool>(&mut self.conn)?;

        Ok(found)
    }

    /// Remove the favorite if it exists, insert it otherwise. The check and
    /// the mutation share one transaction, and the (user_id, movie_id)
    /// unique constraint backs it up.
    pub fn toggle_favorite(
        &mut self,
        user_id: i32,
        movie_id: i32,
        now: NaiveDateTime,
    ) -> Result<FavoriteToggle, Error> {
        self.conn.transaction::<_, Error, _>(|conn| {
            let removed = diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(user_id))
                    .filter(favorites::movie_id.eq(movie_id)),
            )
            .execute(conn)?;

            if removed > 0 {
                return Ok(FavoriteToggle::Removed);
            }

            diesel::insert_into(favorites::table)
                .values(&NewFavorite {
                    user_id,
                    movie_id,
                    created_at: now,
                })
                .execute(conn)?;

            Ok(FavoriteToggle::Added)
        })
    }

    // === Reports ===

    pub fn create_report(
        &mut self,
        user_id: i32,
        message: &str,
        now: NaiveDateTime,
    ) -> Result<(), Error> {
        diesel::insert_into(reports::table)
            .values(&NewReport {
                user_id,
                message,
                created_at: now,
            })
            .execute(&mut self.conn)?;

        Ok(())
    }
}

fn cascade_delete(conn: &mut SqliteConnection, movie_id: i32) -> Result<String, Error> {
    let title = movies::table
        .find(movie_id)
        .select(movies::title)
        .first::<String>(conn)
        .optional()?
        .ok_or(ErrorKind::MovieNotFound(movie_id))?;

    // Dependents first, the movie row last.
    diesel::delete(comments::table.filter(comments::movie_id.eq(movie_id))).execute(conn)?;
    diesel::delete(favorites::table.filter(favorites::movie_id.eq(movie_id))).execute(conn)?;
    diesel::delete(ratings::table.filter(ratings::movie_id.eq(movie_id))).execute(conn)?;
    diesel::delete(movies::table.find(movie_id)).execute(conn)?;

    Ok(title)
}
