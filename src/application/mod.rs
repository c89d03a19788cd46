//! Application services layer.

pub mod admin;
pub mod chrome;
pub mod comments;
pub mod contact;
pub mod error;
pub mod feed;
pub mod forms;
pub mod mutation;
pub mod newsletter;
pub mod repos;
pub mod stream;
pub mod validation;
