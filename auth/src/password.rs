// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use anyhow::Error;

/// Hash a plaintext password for storage.
pub fn hash(password: &str) -> Result<String, Error> {
    let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        log_cause(&e);
        ErrorKind::HashingFailed
    })?;

    Ok(hashed)
}

/// Check a plaintext password against a stored hash.
pub fn verify(password: &str, hashed: &str) -> Result<bool, Error> {
    let matches = bcrypt::verify(password, hashed).map_err(|e| {
        log_cause(&e);
        ErrorKind::VerifyFailed
    })?;

    Ok(matches)
}

fn log_cause(e: &bcrypt::BcryptError) {
    // The bcrypt error itself may mention hash contents, keep it out of
    // anything user facing.
    log::error!("bcrypt failure: {}", e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn verify_accepts_matching_password() -> Result<(), Error> {
        let hashed = hash("secret123")?;
        assert!(verify("secret123", &hashed)?);

        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_password() -> Result<(), Error> {
        let hashed = hash("secret123")?;
        assert!(!verify("secret124", &hashed)?);

        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<(), Error> {
        assert_ne!(hash("secret123")?, hash("secret123")?);

        Ok(())
    }
}
