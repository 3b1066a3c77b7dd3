// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Unknown role ({0})")]
    UnknownRole(String),

    #[error("Failed to hash password")]
    HashingFailed,

    #[error("Failed to verify password")]
    VerifyFailed,
}
