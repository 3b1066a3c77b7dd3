// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::{anyhow, Error};
use auth::{Clock, SystemClock};
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use catalog::models::NewMovie;
use catalog::CatalogController;
use chrono::{Duration, NaiveDate};
use config::Config;
use http_body_util::BodyExt;
use movie_catalog::state::AppState;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

struct TestSite {
    app: Router,
    db_path: String,
    // Dropping the handle removes the directory, keep it alive.
    _dir: TempDir,
}

impl TestSite {
    fn new() -> Result<Self, Error> {
        let dir = tempfile::tempdir()?;
        let db_path = dir
            .path()
            .join("catalog.db")
            .to_str()
            .ok_or_else(|| anyhow!("non-utf8 temp path"))?
            .to_owned();

        let mut catalog = CatalogController::with_path(&db_path)?;
        catalog.init_schema()?;

        let mut config = Config::default();
        config.database.path = db_path.clone();

        Ok(Self {
            app: movie_catalog::app(AppState::new(config)),
            db_path,
            _dir: dir,
        })
    }

    fn catalog(&self) -> Result<CatalogController, Error> {
        CatalogController::with_path(&self.db_path)
    }

    async fn get(&self, uri: &str, session: Option<&str>) -> Result<Response<Body>, Error> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = session {
            request = request.header(COOKIE, cookie);
        }

        let response = self.app.clone().oneshot(request.body(Body::empty())?).await?;
        Ok(response)
    }

    async fn post(
        &self,
        uri: &str,
        body: &str,
        session: Option<&str>,
    ) -> Result<Response<Body>, Error> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, FORM);
        if let Some(cookie) = session {
            request = request.header(COOKIE, cookie);
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(Body::from(body.to_owned()))?)
            .await?;
        Ok(response)
    }

    async fn register(&self, email: &str, password: &str) -> Result<(), Error> {
        let body = format!(
            "name=Ana&surname=Lomidze&email={}&birthdate=2000-01-01&password={}",
            email, password
        );
        let response = self.post("/register", &body, None).await?;
        assert_redirects_to(&response, "/login");
        Ok(())
    }

    /// Log in and return the session cookie pair, e.g. `session=...`.
    async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        let body = format!("email={}&password={}", email, password);
        let response = self.post("/login", &body, None).await?;
        assert_redirects_to(&response, "/");

        session_cookie(&response).ok_or_else(|| anyhow!("login did not set a session cookie"))
    }
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

fn assert_redirects_to(response: &Response<Body>, location: &str) {
    assert_eq!(StatusCode::SEE_OTHER, response.status());
    assert_eq!(
        location,
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    );
}

async fn json_body(response: Response<Body>) -> Result<Value, Error> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

fn seed_movie(site: &TestSite, title: &str) -> Result<i32, Error> {
    let mut catalog = site.catalog()?;
    let submitter = match catalog.user_by_email("submitter@example.com")? {
        Some(user) => user.id,
        None => catalog.create_user(&catalog::models::NewUser {
            name: "Sub",
            surname: "Mitter",
            email: "submitter@example.com",
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1)
                .ok_or_else(|| anyhow!("bad date"))?,
            password: "not-a-real-hash",
            role: "user",
            created_at: SystemClock.now(),
        })?,
    };

    catalog.create_movie(&NewMovie {
        title,
        description: "A movie",
        genre: "Drama",
        year: 2010,
        poster: "poster.jpg",
        video_url: "https://example.com/video",
        duration: 120,
        director: "Someone",
        cast: "Some people",
        imdb_rating: 7.0,
        tmdb_id: None,
        added_by: submitter,
        created_at: SystemClock.now(),
    })
}

#[tokio::test]
async fn index_renders_for_anonymous_visitors() -> Result<(), Error> {
    let site = TestSite::new()?;
    seed_movie(&site, "Inception")?;

    let response = site.get("/?search=incep&rating=not-a-number", None).await?;
    assert_eq!(StatusCode::OK, response.status());

    let bytes = response.into_body().collect().await?.to_bytes();
    let html = String::from_utf8(bytes.to_vec())?;
    assert!(html.contains("Inception"));

    Ok(())
}

#[tokio::test]
async fn register_then_login_starts_a_session() -> Result<(), Error> {
    let site = TestSite::new()?;

    site.register("ana@example.com", "s3cret").await?;
    let session = site.login("ana@example.com", "s3cret").await?;
    assert!(session.starts_with("session="));

    Ok(())
}

#[tokio::test]
async fn wrong_password_is_refused() -> Result<(), Error> {
    let site = TestSite::new()?;
    site.register("ana@example.com", "s3cret").await?;

    let response = site
        .post("/login", "email=ana@example.com&password=wrong", None)
        .await?;

    assert_redirects_to(&response, "/login");
    assert!(session_cookie(&response).is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_registration_bounces_back() -> Result<(), Error> {
    let site = TestSite::new()?;
    site.register("ana@example.com", "s3cret").await?;

    let response = site
        .post(
            "/register",
            "name=Ana&surname=Lomidze&email=ana@example.com&birthdate=2000-01-01&password=other",
            None,
        )
        .await?;

    assert_redirects_to(&response, "/register");

    Ok(())
}

#[tokio::test]
async fn banned_users_cannot_log_in_until_the_ban_elapses() -> Result<(), Error> {
    let site = TestSite::new()?;
    site.register("ana@example.com", "s3cret").await?;

    let user = site
        .catalog()?
        .user_by_email("ana@example.com")?
        .ok_or_else(|| anyhow!("missing user"))?;

    site.catalog()?
        .ban_user(user.id, Some(SystemClock.now() + Duration::hours(1)))?;

    let refused = site
        .post("/login", "email=ana@example.com&password=s3cret", None)
        .await?;
    assert_redirects_to(&refused, "/login");

    site.catalog()?.ban_user(user.id, None)?;
    site.login("ana@example.com", "s3cret").await?;

    Ok(())
}

#[tokio::test]
async fn rating_requires_a_session() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Movie")?;

    let response = site
        .post(&format!("/movie/{}/rate", movie), "rating=5", None)
        .await?;

    assert_redirects_to(&response, "/login");

    Ok(())
}

#[tokio::test]
async fn out_of_range_rating_bounces_back_to_the_movie() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Movie")?;

    site.register("ana@example.com", "s3cret").await?;
    let session = site.login("ana@example.com", "s3cret").await?;

    let response = site
        .post(
            &format!("/movie/{}/rate", movie),
            "rating=9&review=way+too+good",
            Some(&session),
        )
        .await?;

    assert_redirects_to(&response, &format!("/movie/{}", movie));

    Ok(())
}

#[tokio::test]
async fn favorite_toggle_round_trips_as_json() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Movie")?;

    site.register("ana@example.com", "s3cret").await?;
    let session = site.login("ana@example.com", "s3cret").await?;
    let uri = format!("/movie/{}/favorite", movie);

    let added = json_body(site.post(&uri, "", Some(&session)).await?).await?;
    assert_eq!(Some(true), added["success"].as_bool());
    assert_eq!(Some(true), added["is_favorite"].as_bool());

    let removed = json_body(site.post(&uri, "", Some(&session)).await?).await?;
    assert_eq!(Some(true), removed["success"].as_bool());
    assert_eq!(Some(false), removed["is_favorite"].as_bool());

    Ok(())
}

#[tokio::test]
async fn favorite_toggle_refuses_anonymous_callers() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Movie")?;

    let body = json_body(
        site.post(&format!("/movie/{}/favorite", movie), "", None)
            .await?,
    )
    .await?;

    assert_eq!(Some(false), body["success"].as_bool());
    assert_eq!(Some("Authorization required"), body["message"].as_str());

    Ok(())
}

#[tokio::test]
async fn missing_movie_detail_redirects_home() -> Result<(), Error> {
    let site = TestSite::new()?;

    let response = site.get("/movie/4242", None).await?;
    assert_redirects_to(&response, "/");

    Ok(())
}

#[tokio::test]
async fn only_privileged_roles_may_delete_movies() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Doomed")?;

    site.register("ana@example.com", "s3cret").await?;
    let session = site.login("ana@example.com", "s3cret").await?;

    let refused = site
        .post(&format!("/movie/{}/delete", movie), "", Some(&session))
        .await?;
    assert_redirects_to(&refused, "/");
    assert!(site.catalog()?.movie_with_stats(movie)?.is_some());

    site.catalog()?.seed_dev_admin(SystemClock.now())?;
    let admin = site
        .login(catalog::setup::ADMIN_EMAIL, catalog::setup::ADMIN_PASSWORD)
        .await?;

    let allowed = site
        .post(&format!("/movie/{}/delete", movie), "", Some(&admin))
        .await?;
    assert_redirects_to(&allowed, "/");
    assert!(site.catalog()?.movie_with_stats(movie)?.is_none());

    Ok(())
}

#[tokio::test]
async fn deleting_without_a_session_redirects_to_login() -> Result<(), Error> {
    let site = TestSite::new()?;
    let movie = seed_movie(&site, "Movie")?;

    let response = site
        .post(&format!("/movie/{}/delete", movie), "", None)
        .await?;

    assert_redirects_to(&response, "/login");

    Ok(())
}
