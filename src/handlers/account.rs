//! Registration, login and logout.

use super::{open_catalog, render_page};
use crate::error::AppResult;
use crate::flash::{self, Level};
use crate::session;
use crate::state::AppState;
use auth::{Role, SessionUser};
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::SignedCookieJar;
use catalog::error::ErrorKind;
use catalog::models::NewUser;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    surname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    birthdate: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn register_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    render_page(&state, jar, "register", json!({}))
}

pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let required = [
        &form.name,
        &form.surname,
        &form.email,
        &form.birthdate,
        &form.password,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        let jar = flash::push(jar, Level::Error, "All fields are required");
        return Ok((jar, Redirect::to("/register")).into_response());
    }

    let birthdate = match NaiveDate::parse_from_str(form.birthdate.trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            let jar = flash::push(jar, Level::Error, "Birthdate must look like 2000-01-31");
            return Ok((jar, Redirect::to("/register")).into_response());
        }
    };

    let hashed = auth::password::hash(&form.password)?;

    let mut catalog = open_catalog(&state)?;
    let created = catalog.create_user(&NewUser {
        name: form.name.trim(),
        surname: form.surname.trim(),
        email: form.email.trim(),
        birthdate,
        password: &hashed,
        role: Role::default().as_str(),
        created_at: state.clock.now(),
    });

    match created {
        Ok(_) => {
            let jar = flash::push(jar, Level::Success, "Registration complete, you can log in now");
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(err) => match err.downcast_ref::<ErrorKind>() {
            Some(ErrorKind::EmailTaken(_)) => {
                let jar = flash::push(jar, Level::Error, "This email is already registered");
                Ok((jar, Redirect::to("/register")).into_response())
            }
            _ => Err(err.into()),
        },
    }
}

pub async fn login_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    render_page(&state, jar, "login", json!({}))
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let mut catalog = open_catalog(&state)?;

    if let Some(user) = catalog.user_by_email(form.email.trim())? {
        if auth::password::verify(&form.password, &user.password)? {
            if !auth::login_allowed(user.banned_until, state.clock.as_ref()) {
                let jar = flash::push(jar, Level::Error, "Your account is temporarily suspended");
                return Ok((jar, Redirect::to("/login")).into_response());
            }

            let role = user.role()?;
            let jar = session::log_in(
                jar,
                &SessionUser {
                    id: user.id,
                    name: user.name.clone(),
                    role,
                },
            );
            let jar = flash::push(jar, Level::Success, "Welcome back!");
            return Ok((jar, Redirect::to("/")).into_response());
        }
    }

    let jar = flash::push(jar, Level::Error, "Wrong email or password");
    Ok((jar, Redirect::to("/login")).into_response())
}

pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    let jar = session::log_out(jar);
    let jar = flash::push(jar, Level::Success, "Logged out, see you soon");
    (jar, Redirect::to("/"))
}
