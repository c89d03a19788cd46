use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::admin::audit::AuditService;
use crate::application::forms::ReplyDraft;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{CommentsRepo, RepoError};
use crate::domain::entities::CommentRecord;
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum AdminCommentError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for AdminCommentError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::Domain(DomainError::not_found("comment")),
            other => Self::Repo(other),
        }
    }
}

impl From<AdminCommentError> for MutationFailure {
    fn from(err: AdminCommentError) -> Self {
        match err {
            AdminCommentError::Domain(DomainError::NotFound { .. }) => {
                MutationFailure::not_found("Comment not found.")
            }
            AdminCommentError::Domain(DomainError::Validation { message }) => {
                MutationFailure::failed(message)
            }
            AdminCommentError::Repo(_) => {
                MutationFailure::failed("The comment could not be updated. Please try again later.")
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct CommentSnapshot<'a> {
    post_slug: &'a str,
    author_name: &'a str,
    reply_text: Option<&'a str>,
}

impl<'a> From<&'a CommentRecord> for CommentSnapshot<'a> {
    fn from(record: &'a CommentRecord) -> Self {
        Self {
            post_slug: record.post_slug.as_str(),
            author_name: record.author_name.as_str(),
            reply_text: record.reply_text.as_deref(),
        }
    }
}

#[derive(Clone)]
pub struct AdminCommentService {
    repo: Arc<dyn CommentsRepo>,
    audit: AuditService,
}

impl AdminCommentService {
    pub fn new(repo: Arc<dyn CommentsRepo>, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn list_comments(&self) -> Result<Vec<CommentRecord>, AdminCommentError> {
        Ok(self.repo.list_comments().await?)
    }

    pub async fn reply(
        &self,
        actor: &str,
        id: Uuid,
        draft: ReplyDraft,
    ) -> Result<CommentRecord, AdminCommentError> {
        let comment = self.repo.set_reply(id, draft.reply_text).await?;

        info!(
            target = "quire::application::admin::comments",
            comment_id = %comment.id,
            post_slug = %comment.post_slug,
            "Reply saved"
        );
        self.audit
            .record(
                actor,
                "comment.reply",
                "comment",
                Some(&comment.id.to_string()),
                Some(&CommentSnapshot::from(&comment)),
            )
            .await?;

        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        actor: &str,
        id: Uuid,
    ) -> Result<CommentRecord, AdminCommentError> {
        let comment = self.repo.delete_comment(id).await?;

        info!(
            target = "quire::application::admin::comments",
            comment_id = %comment.id,
            post_slug = %comment.post_slug,
            "Comment deleted"
        );
        self.audit
            .record(
                actor,
                "comment.delete",
                "comment",
                Some(&comment.id.to_string()),
                Some(&CommentSnapshot::from(&comment)),
            )
            .await?;

        Ok(comment)
    }
}
