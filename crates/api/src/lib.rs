// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvln-api: the HTTP timeline query API.

pub mod contract;
pub mod error;
pub mod handlers;
pub mod router;
mod serve;

pub use error::ApiError;
pub use router::build_router;
pub use serve::serve;
