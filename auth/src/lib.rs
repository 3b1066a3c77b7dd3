// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod clock;
pub mod error;
pub mod password;
pub mod role;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use role::Role;
pub use session::SessionUser;

use chrono::NaiveDateTime;

/// Whether a user with the given ban expiry may log in right now.
///
/// A ban only blocks the login step: an expiry in the future refuses the
/// attempt, an elapsed or absent expiry admits it. Sessions that already
/// exist are left alone.
pub fn login_allowed(banned_until: Option<NaiveDateTime>, clock: &dyn Clock) -> bool {
    match banned_until {
        Some(until) => until <= clock.now(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn future_ban_refuses_login() {
        let clock = FixedClock(noon());
        assert!(!login_allowed(Some(noon() + Duration::hours(1)), &clock));
    }

    #[test]
    fn elapsed_ban_admits_login() {
        let clock = FixedClock(noon());
        assert!(login_allowed(Some(noon() - Duration::hours(1)), &clock));
    }

    #[test]
    fn absent_ban_admits_login() {
        let clock = FixedClock(noon());
        assert!(login_allowed(None, &clock));
    }
}
