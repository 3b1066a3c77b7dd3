// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

/// Optional listing filters, combined with AND. Every value ends up as a
/// bound parameter, never as text spliced into the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilters {
    /// Case-insensitive substring match against title, description,
    /// director and cast, OR-combined.
    pub search: Option<String>,

    /// Substring match against the genre column.
    pub genre: Option<String>,

    /// Exact release year.
    pub year: Option<i32>,

    /// Keep only movies whose average rating reaches this value. Applied
    /// after aggregation, so a movie without ratings counts as 0.
    pub min_rating: Option<f64>,
}

impl MovieFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }
}
