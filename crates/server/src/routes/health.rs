// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{handlers::health, state::AppState};
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health::get_health))
}
