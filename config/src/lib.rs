// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Secret used to sign session and flash cookies. Any non-trivial string
    /// works, the cookie key is derived from it.
    #[serde(default = "default_secret")]
    pub secret_key: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Seed the development admin account on startup. Never enable this in
    /// production, the credentials are well known.
    #[serde(default)]
    pub seed_admin: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadsConfig {
    /// Movie posters and video files.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// User profile pictures, kept apart from movie media.
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub uploads: UploadsConfig,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_secret() -> String {
    "development-secret-change-me-0123456789".to_string()
}

fn default_db_path() -> String {
    "database.db".to_string()
}

fn default_uploads_dir() -> String {
    "static/uploads".to_string()
}

fn default_profiles_dir() -> String {
    "static/profiles".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: default_bind(),
                secret_key: default_secret(),
            },
            database: DatabaseConfig {
                path: default_db_path(),
                seed_admin: false,
            },
            uploads: UploadsConfig {
                uploads_dir: default_uploads_dir(),
                profiles_dir: default_profiles_dir(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let expected = Config {
            server: ServerConfig {
                bind: "127.0.0.1:5000".to_string(),
                secret_key: "example-secret".to_string(),
            },
            database: DatabaseConfig {
                path: "database.db".to_string(),
                seed_admin: true,
            },
            uploads: UploadsConfig {
                uploads_dir: "static/uploads".to_string(),
                profiles_dir: "static/profiles".to_string(),
            },
        };

        let loaded = Config::load("example.toml")?;
        assert_eq!(expected, loaded);

        Ok(())
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() -> Result<(), Error> {
        let parsed: Config = toml::from_str(
            r#"
            [server]
            [database]
            [uploads]
            "#,
        )?;

        assert_eq!(Config::default(), parsed);

        Ok(())
    }
}
