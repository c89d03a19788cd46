//! Post administration: listing, lookups and the create / update / delete
//! writes behind the editor forms.

mod commands;
mod queries;
mod service;
mod types;

pub use service::AdminPostService;
pub use types::AdminPostError;
