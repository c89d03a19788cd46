//! askama view models and template bindings.

pub mod admin;
pub mod forms;
pub mod views;
