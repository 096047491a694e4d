// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Pre-built test data.

use bistro_store::{into_document, Document};
use serde_json::{json, Value};

/// Token secret used by every test application.
pub const TEST_SECRET: &str = "test-secret-key-for-token-signing-at-least-32-chars";

fn document(value: Value) -> Document {
    into_document(value).expect("fixture must be a JSON object")
}

/// Menu item fixtures.
pub struct MenuFixtures;

impl MenuFixtures {
    /// A main course.
    pub fn steak() -> Document {
        document(json!({
            "name": "Ribeye Steak",
            "recipe": "Dry-aged ribeye, herb butter",
            "category": "main",
            "price": 24.5
        }))
    }

    /// A dessert.
    pub fn tart() -> Document {
        document(json!({
            "name": "Lemon Tart",
            "recipe": "Shortcrust, lemon curd",
            "category": "dessert",
            "price": 7.0
        }))
    }
}

/// User fixtures.
pub struct UserFixtures;

impl UserFixtures {
    /// A registration body for `email`.
    pub fn registration(email: &str) -> Value {
        json!({ "name": "Test Diner", "email": email })
    }

    /// A stored user record with an explicit role.
    pub fn with_role(email: &str, role: &str) -> Document {
        document(json!({ "name": "Test Diner", "email": email, "role": role }))
    }
}

/// Cart fixtures.
pub struct CartFixtures;

impl CartFixtures {
    /// A cart entry for `email` referencing `menu_id`.
    pub fn entry(email: &str, menu_id: &str) -> Value {
        json!({
            "menuId": menu_id,
            "email": email,
            "name": "Lemon Tart",
            "price": 7.0
        })
    }
}
