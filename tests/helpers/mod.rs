//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod dia_fixtures;
pub mod model_assertions;
