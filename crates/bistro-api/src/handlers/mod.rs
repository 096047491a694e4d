// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`health`]: greeting, liveness and readiness
//! - [`jwt`]: token issuance
//! - [`menu`]: menu listing and admin menu management
//! - [`review`]: customer reviews
//! - [`users`]: registration, role checks and user administration
//! - [`carts`]: shopping cart entries

mod carts;
mod health;
mod jwt;
mod menu;
mod review;
mod users;

pub use carts::*;
pub use health::*;
pub use jwt::*;
pub use menu::*;
pub use review::*;
pub use users::*;
