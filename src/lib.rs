//! Quire: a small blog with a public reading surface and an admin area
//! whose every write goes through a validated mutation.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
