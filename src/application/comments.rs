//! Reader comments on published posts.

use std::sync::Arc;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::application::admin::audit::AuditService;
use crate::application::error::HttpError;
use crate::application::forms::CommentDraft;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{
    CommentsRepo, CreateCommentParams, PostsRepo, RepoError, SettingsRepo,
};
use crate::domain::entities::CommentRecord;
use crate::domain::error::DomainError;

pub const COMMENTS_DISABLED_MESSAGE: &str = "Comments are currently disabled.";

#[derive(Debug, Error)]
pub enum CommentError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<CommentError> for MutationFailure {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::Domain(DomainError::NotFound { .. }) => {
                MutationFailure::not_found("Post not found.")
            }
            CommentError::Domain(DomainError::Validation { message }) => {
                MutationFailure::failed(message)
            }
            CommentError::Repo(_) => {
                MutationFailure::failed("Failed to post your comment. Please try again later.")
            }
        }
    }
}

impl From<CommentError> for HttpError {
    fn from(err: CommentError) -> Self {
        let (status, public_message) = match &err {
            CommentError::Domain(DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Resource not found")
            }
            _ => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ),
        };
        HttpError::from_error(
            "application::comments::CommentService",
            status,
            public_message,
            &err,
        )
    }
}

#[derive(Debug, Serialize)]
struct CommentSnapshot<'a> {
    post_slug: &'a str,
    author_name: &'a str,
}

#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostsRepo>,
    comments: Arc<dyn CommentsRepo>,
    settings: Arc<dyn SettingsRepo>,
    audit: AuditService,
}

impl CommentService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        comments: Arc<dyn CommentsRepo>,
        settings: Arc<dyn SettingsRepo>,
        audit: AuditService,
    ) -> Self {
        Self {
            posts,
            comments,
            settings,
            audit,
        }
    }

    pub async fn comments_enabled(&self) -> Result<bool, CommentError> {
        Ok(self.settings.load_site_settings().await?.enable_comments_globally)
    }

    pub async fn add_comment(
        &self,
        actor: &str,
        post_slug: &str,
        draft: CommentDraft,
    ) -> Result<CommentRecord, CommentError> {
        if !self.comments_enabled().await? {
            return Err(DomainError::validation(COMMENTS_DISABLED_MESSAGE).into());
        }

        let post = self
            .posts
            .find_by_slug(post_slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post"))?;

        let comment = self
            .comments
            .create_comment(CreateCommentParams {
                post_id: post.id,
                post_slug: post.slug.clone(),
                author_name: draft.author_name,
                author_email: draft.author_email,
                avatar_url: None,
                text: draft.text,
            })
            .await
            .map_err(|err| match err {
                // The post was deleted after the lookup above.
                RepoError::NotFound => CommentError::from(DomainError::not_found("post")),
                other => CommentError::from(other),
            })?;

        info!(
            target = "quire::application::comments",
            comment_id = %comment.id,
            post_slug = %comment.post_slug,
            "Comment added"
        );
        self.audit
            .record(
                actor,
                "comment.create",
                "comment",
                Some(&comment.id.to_string()),
                Some(&CommentSnapshot {
                    post_slug: &comment.post_slug,
                    author_name: &comment.author_name,
                }),
            )
            .await?;

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::entities::SiteSettingsRecord;
    use crate::infra::memory::InMemoryRepositories;

    struct OfflineSettings;

    #[async_trait]
    impl SettingsRepo for OfflineSettings {
        async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError> {
            Err(RepoError::from_persistence("settings store offline"))
        }

        async fn upsert_site_settings(&self, _: SiteSettingsRecord) -> Result<(), RepoError> {
            Err(RepoError::from_persistence("settings store offline"))
        }
    }

    fn service_with_offline_settings() -> CommentService {
        let repos = InMemoryRepositories::with_demo_content();
        CommentService::new(
            repos.clone(),
            repos.clone(),
            Arc::new(OfflineSettings),
            AuditService::new(repos),
        )
    }

    #[tokio::test]
    async fn unreadable_comment_flag_is_unavailable() {
        let err = service_with_offline_settings()
            .comments_enabled()
            .await
            .expect_err("settings offline");
        assert_eq!(
            HttpError::from(err).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn missing_post_maps_to_not_found() {
        let err = CommentError::from(DomainError::not_found("post"));
        assert_eq!(HttpError::from(err).status(), StatusCode::NOT_FOUND);
    }
}
