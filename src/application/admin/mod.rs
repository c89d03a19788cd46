//! Application services for the administrative surface.

pub mod audit;
pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod posts;
pub mod settings;
pub mod subscribers;
