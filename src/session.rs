use auth::SessionUser;
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};

pub const SESSION_COOKIE: &str = "session";

/// Read the logged-in user, if any. A missing, tampered or undecodable
/// cookie all read as anonymous.
pub fn current_user(jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    serde_json::from_str(cookie.value()).ok()
}

pub fn log_in(jar: SignedCookieJar, user: &SessionUser) -> SignedCookieJar {
    let value = match serde_json::to_string(user) {
        Ok(value) => value,
        Err(err) => {
            log::error!("failed to encode session for user {}: {}", user.id, err);
            return jar;
        }
    };

    jar.add(Cookie::build((SESSION_COOKIE, value)).path("/").http_only(true))
}

pub fn log_out(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::Role;
    use axum_extra::extract::cookie::Key;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::derive_from(b"session-module-test-secret-0123456789"))
    }

    fn ana() -> SessionUser {
        SessionUser {
            id: 1,
            name: "Ana".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn round_trips_the_session_user() {
        let jar = log_in(jar(), &ana());
        assert_eq!(Some(ana()), current_user(&jar));
    }

    #[test]
    fn log_out_clears_the_user() {
        let jar = log_in(jar(), &ana());
        let jar = log_out(jar);
        assert_eq!(None, current_user(&jar));
    }
}
