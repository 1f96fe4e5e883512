// Copyright 2026 the Etch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `etch`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that shared utilities are defined once.
//! - If you want to add new tests, put them into the module matching their "topic" (e.g.
//!   cache, draw, etc.), or create a new one in case it doesn't exist yet.
//! - For test naming, try to put the "topic" of the test at the start of the name instead of
//!   the end. For example, `cache_evicts_least_recent` is better than
//!   `evicts_least_recent_cache`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod cache;
mod draw;
mod threads;
mod util;
