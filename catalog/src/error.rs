// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't find movie with id({0})")]
    MovieNotFound(i32),

    #[error("Email is already registered ({0})")]
    EmailTaken(String),

    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i32),
}
