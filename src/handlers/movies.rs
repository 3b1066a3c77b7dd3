//! Listing, detail and the movie mutation endpoints.

use super::{open_catalog, render_page};
use crate::error::AppResult;
use crate::flash::{self, Level};
use crate::session;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::SignedCookieJar;
use catalog::error::ErrorKind;
use catalog::filters::MovieFilters;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    search: Option<String>,
    genre: Option<String>,
    year: Option<String>,
    rating: Option<String>,
}

/// Malformed `year`/`rating` values are dropped rather than rejected: the
/// listing renders without that filter instead of erroring on a bad query
/// string.
fn listing_filters(params: &ListingParams) -> MovieFilters {
    let mut filters = MovieFilters::new();

    if let Some(search) = non_empty(&params.search) {
        filters.search = Some(search.to_owned());
    }
    if let Some(genre) = non_empty(&params.genre) {
        filters.genre = Some(genre.to_owned());
    }
    if let Some(year) = non_empty(&params.year) {
        filters.year = year.parse().ok();
    }
    if let Some(rating) = non_empty(&params.rating) {
        filters.min_rating = rating.parse().ok();
    }

    filters
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<ListingParams>,
) -> AppResult<Response> {
    let mut catalog = open_catalog(&state)?;

    let movies = catalog.list_movies(&listing_filters(&params))?;
    let genres = catalog.distinct_genres()?;
    let years = catalog.distinct_years()?;
    let user = session::current_user(&jar);

    render_page(
        &state,
        jar,
        "index",
        json!({
            "movies": movies,
            "genres": genres,
            "years": years,
            "search_query": params.search.unwrap_or_default(),
            "genre_filter": params.genre.unwrap_or_default(),
            "year_filter": params.year.unwrap_or_default(),
            "rating_filter": params.rating.unwrap_or_default(),
            "user": user,
        }),
    )
}

pub async fn movie_detail(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(movie_id): Path<i32>,
) -> AppResult<Response> {
    let mut catalog = open_catalog(&state)?;

    let movie = match catalog.movie_with_stats(movie_id)? {
        Some(movie) => movie,
        None => {
            let jar = flash::push(jar, Level::Error, "Movie not found");
            return Ok((jar, Redirect::to("/")).into_response());
        }
    };

    let comments = catalog.comments_for_movie(movie_id)?;
    let reviews = catalog.reviews_for_movie(movie_id)?;

    // Favorite state and own rating only exist for a session user.
    let user = session::current_user(&jar);
    let (is_favorite, user_rating) = match &user {
        Some(user) => (
            catalog.is_favorite(user.id, movie_id)?,
            catalog.user_rating(user.id, movie_id)?,
        ),
        None => (false, None),
    };

    render_page(
        &state,
        jar,
        "movie_detail",
        json!({
            "movie": movie,
            "comments": comments,
            "ratings": reviews,
            "is_favorite": is_favorite,
            "user_rating": user_rating,
            "user": user,
        }),
    )
}

pub async fn delete_movie(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(movie_id): Path<i32>,
) -> AppResult<Response> {
    let user = match session::current_user(&jar) {
        Some(user) => user,
        None => {
            let jar = flash::push(jar, Level::Error, "You need to log in first");
            return Ok((jar, Redirect::to("/login")).into_response());
        }
    };

    if !user.role.can_delete_movies() {
        let jar = flash::push(jar, Level::Error, "You are not allowed to do that");
        return Ok((jar, Redirect::to("/")).into_response());
    }

    let mut catalog = open_catalog(&state)?;
    let jar = match catalog.delete_movie_cascade(movie_id) {
        Ok(title) => flash::push(
            jar,
            Level::Success,
            format!("Movie \"{}\" has been deleted", title),
        ),
        Err(err) => match err.downcast_ref::<ErrorKind>() {
            Some(ErrorKind::MovieNotFound(_)) => flash::push(jar, Level::Error, "Movie not found"),
            _ => {
                log::error!("failed to delete movie {}: {:#}", movie_id, err);
                flash::push(
                    jar,
                    Level::Error,
                    "Something went wrong while deleting the movie",
                )
            }
        },
    };

    Ok((jar, Redirect::to("/")).into_response())
}

#[derive(Debug, Deserialize)]
pub struct RateForm {
    rating: Option<String>,
    #[serde(default)]
    review: String,
}

pub async fn rate_movie(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(movie_id): Path<i32>,
    Form(form): Form<RateForm>,
) -> AppResult<Response> {
    let user = match session::current_user(&jar) {
        Some(user) => user,
        None => {
            let jar = flash::push(jar, Level::Error, "Log in to leave a rating");
            return Ok((jar, Redirect::to("/login")).into_response());
        }
    };

    let detail = format!("/movie/{}", movie_id);

    let rating = match form
        .rating
        .as_deref()
        .and_then(|value| value.trim().parse::<i32>().ok())
    {
        Some(rating) => rating,
        None => {
            let jar = flash::push(jar, Level::Error, "Rating must be between 1 and 5");
            return Ok((jar, Redirect::to(&detail)).into_response());
        }
    };

    let mut catalog = open_catalog(&state)?;
    let saved = catalog.upsert_rating(
        user.id,
        movie_id,
        rating,
        form.review.trim(),
        state.clock.now(),
    );

    match saved {
        Ok(()) => {
            let jar = flash::push(jar, Level::Success, "Your rating has been saved");
            Ok((jar, Redirect::to(&detail)).into_response())
        }
        Err(err) => match err.downcast_ref::<ErrorKind>() {
            Some(ErrorKind::RatingOutOfRange(_)) => {
                let jar = flash::push(jar, Level::Error, "Rating must be between 1 and 5");
                Ok((jar, Redirect::to(&detail)).into_response())
            }
            _ => Err(err.into()),
        },
    }
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(movie_id): Path<i32>,
) -> AppResult<Json<Value>> {
    let user = match session::current_user(&jar) {
        Some(user) => user,
        None => {
            return Ok(Json(json!({
                "success": false,
                "message": "Authorization required",
            })));
        }
    };

    let mut catalog = open_catalog(&state)?;
    let toggle = catalog.toggle_favorite(user.id, movie_id, state.clock.now())?;

    let message = if toggle.is_favorite() {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };

    Ok(Json(json!({
        "success": true,
        "is_favorite": toggle.is_favorite(),
        "message": message,
    })))
}
