use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// A short-lived user-facing message, shown on the next rendered page and
/// dropped afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

fn queued(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}

pub fn push(jar: SignedCookieJar, level: Level, message: impl Into<String>) -> SignedCookieJar {
    let mut messages = queued(&jar);
    messages.push(Flash {
        level,
        message: message.into(),
    });

    match serde_json::to_string(&messages) {
        Ok(value) => jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true)),
        Err(err) => {
            log::error!("failed to queue flash message: {}", err);
            jar
        }
    }
}

/// Drain the queue: returns the jar with the cookie cleared plus whatever
/// was waiting, oldest first.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    let messages = queued(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}
