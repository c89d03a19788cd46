use serde::Serialize;
use thiserror::Error;

use crate::application::forms::PostForm;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{POSTS_SLUG_CONSTRAINT, RepoError};
use crate::application::validation::FormSchema;
use crate::domain::error::DomainError;

pub const SLUG_TAKEN_MESSAGE: &str = "A post with this slug already exists.";

#[derive(Debug, Error)]
pub enum AdminPostError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("slug `{0}` is already in use")]
    SlugTaken(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl AdminPostError {
    /// Lift the store's unique-slug rejection into a field-level error.
    pub(crate) fn from_write(err: RepoError, slug: &str) -> Self {
        match err {
            RepoError::Duplicate { constraint } if constraint == POSTS_SLUG_CONSTRAINT => {
                Self::SlugTaken(slug.to_string())
            }
            RepoError::NotFound => Self::Domain(DomainError::not_found("post")),
            other => Self::Repo(other),
        }
    }
}

impl From<AdminPostError> for MutationFailure {
    fn from(err: AdminPostError) -> Self {
        match err {
            AdminPostError::SlugTaken(_) => {
                MutationFailure::conflict(PostForm::INVALID_MESSAGE, "slug", SLUG_TAKEN_MESSAGE)
            }
            AdminPostError::Domain(DomainError::NotFound { .. }) => {
                MutationFailure::not_found("Post not found.")
            }
            AdminPostError::Domain(DomainError::Validation { message }) => {
                MutationFailure::failed(message)
            }
            AdminPostError::Repo(_) => {
                MutationFailure::failed("The post could not be saved. Please try again later.")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSnapshot<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub category: Option<&'a str>,
    pub tags: &'a [String],
}
