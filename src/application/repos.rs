//! Repository traits describing storage adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    AuditLogRecord, CommentRecord, ContactMessageRecord, PostRecord, SiteSettingsRecord,
    SubscriberRecord, TeamMemberRecord,
};

pub const POSTS_SLUG_CONSTRAINT: &str = "posts_slug_key";
pub const SUBSCRIBERS_EMAIL_CONSTRAINT: &str = "subscribers_email_key";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn duplicate(constraint: &str) -> Self {
        Self::Duplicate {
            constraint: constraint.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub content_html: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub published_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub content_html: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub post_id: Uuid,
    pub post_slug: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub avatar_url: Option<String>,
    pub text: String,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// All posts, newest first.
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    /// Fails with [`RepoError::Duplicate`] when the slug is taken.
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    /// Fails with [`RepoError::Duplicate`] when the slug belongs to another post.
    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    /// Removes the post together with its comments.
    async fn delete_post(&self, id: Uuid) -> Result<PostRecord, RepoError>;

    /// Unassigns the category from every post whose category shares its
    /// filter key; returns the number of posts touched.
    async fn clear_category(&self, category: &str) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait CommentsRepo: Send + Sync {
    /// All comments, newest first.
    async fn list_comments(&self) -> Result<Vec<CommentRecord>, RepoError>;

    /// Comments for a single post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>, RepoError>;

    async fn create_comment(&self, params: CreateCommentParams)
    -> Result<CommentRecord, RepoError>;

    async fn set_reply(&self, id: Uuid, reply_text: String) -> Result<CommentRecord, RepoError>;

    async fn delete_comment(&self, id: Uuid) -> Result<CommentRecord, RepoError>;
}

#[async_trait]
pub trait SubscribersRepo: Send + Sync {
    /// All subscribers, oldest first.
    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, RepoError>;

    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscriberRecord>, RepoError>;

    /// Fails with [`RepoError::Duplicate`] when the address is already stored.
    async fn create_subscriber(&self, email: &str) -> Result<SubscriberRecord, RepoError>;

    async fn delete_subscriber(&self, id: Uuid) -> Result<SubscriberRecord, RepoError>;
}

#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn list_team(&self) -> Result<Vec<TeamMemberRecord>, RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError>;

    async fn upsert_site_settings(&self, settings: SiteSettingsRecord) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn append_message(&self, record: ContactMessageRecord) -> Result<(), RepoError>;

    async fn count_messages(&self) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError>;

    /// Most recent entries first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditLogRecord>, RepoError>;
}
