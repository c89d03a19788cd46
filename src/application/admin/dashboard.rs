//! Figures shown on the admin landing page.

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::admin::audit::AuditService;
use crate::application::repos::{
    CommentsRepo, ContactRepo, PostsRepo, RepoError, SubscribersRepo,
};
use crate::domain::entities::{AuditLogRecord, PostRecord};

const RECENT_ACTIVITY_LIMIT: usize = 8;
const RECENT_POSTS_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct DashboardOverview {
    pub post_count: usize,
    pub subscriber_count: usize,
    pub comment_count: usize,
    pub category_count: usize,
    pub message_count: u64,
    pub recent_posts: Vec<PostRecord>,
    pub recent_activity: Vec<AuditLogRecord>,
}

#[derive(Clone)]
pub struct DashboardService {
    posts: Arc<dyn PostsRepo>,
    comments: Arc<dyn CommentsRepo>,
    subscribers: Arc<dyn SubscribersRepo>,
    contact: Arc<dyn ContactRepo>,
    audit: AuditService,
}

impl DashboardService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        comments: Arc<dyn CommentsRepo>,
        subscribers: Arc<dyn SubscribersRepo>,
        contact: Arc<dyn ContactRepo>,
        audit: AuditService,
    ) -> Self {
        Self {
            posts,
            comments,
            subscribers,
            contact,
            audit,
        }
    }

    pub async fn overview(&self) -> Result<DashboardOverview, RepoError> {
        let posts = self.posts.list_posts().await?;
        let comment_count = self.comments.list_comments().await?.len();
        let subscriber_count = self.subscribers.list_subscribers().await?.len();
        let message_count = self.contact.count_messages().await?;
        let recent_activity = self.audit.list_recent(RECENT_ACTIVITY_LIMIT).await?;

        let category_count = posts
            .iter()
            .filter_map(PostRecord::category_key)
            .collect::<HashSet<_>>()
            .len();

        Ok(DashboardOverview {
            post_count: posts.len(),
            subscriber_count,
            comment_count,
            category_count,
            message_count,
            recent_posts: posts.into_iter().take(RECENT_POSTS_LIMIT).collect(),
            recent_activity,
        })
    }
}
