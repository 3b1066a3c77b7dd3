// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// What a logged-in session carries: just enough to greet the user and make
/// authorization decisions. Written only at the login boundary, cleared at
/// logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub name: String,
    pub role: Role,
}
