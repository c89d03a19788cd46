//! In-process storage adapters.
//!
//! Each collection sits behind its own `tokio::sync::RwLock`; checks that
//! must agree with the write they guard (slug and email uniqueness) run
//! under the same write guard as the insert.

mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::repos::{
    AuditRepo, CommentsRepo, ContactRepo, CreateCommentParams, CreatePostParams,
    POSTS_SLUG_CONSTRAINT, PostsRepo, PostsWriteRepo, RepoError, SUBSCRIBERS_EMAIL_CONSTRAINT,
    SettingsRepo, SubscribersRepo, TeamRepo, UpdatePostParams,
};
use crate::domain::entities::{
    AuditLogRecord, CommentRecord, ContactMessageRecord, PostRecord, SiteSettingsRecord,
    SubscriberRecord, TeamMemberRecord,
};
use crate::domain::posts::category_key;

pub use seed::{default_site_settings, demo_content};

/// Subscriptions for this address fail as if the mail provider refused them.
pub const SIMULATED_FAILURE_EMAIL: &str = "fail@example.com";

/// Initial contents of the store.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub posts: Vec<PostRecord>,
    pub comments: Vec<CommentRecord>,
    pub subscribers: Vec<SubscriberRecord>,
    pub team: Vec<TeamMemberRecord>,
    pub settings: SiteSettingsRecord,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            comments: Vec::new(),
            subscribers: Vec::new(),
            team: Vec::new(),
            settings: default_site_settings(),
        }
    }
}

#[derive(Debug)]
pub struct InMemoryRepositories {
    posts: RwLock<Vec<PostRecord>>,
    comments: RwLock<Vec<CommentRecord>>,
    subscribers: RwLock<Vec<SubscriberRecord>>,
    team: RwLock<Vec<TeamMemberRecord>>,
    settings: RwLock<SiteSettingsRecord>,
    messages: RwLock<Vec<ContactMessageRecord>>,
    audit: RwLock<Vec<AuditLogRecord>>,
}

impl InMemoryRepositories {
    pub fn new(seed: SeedData) -> Self {
        Self {
            posts: RwLock::new(seed.posts),
            comments: RwLock::new(seed.comments),
            subscribers: RwLock::new(seed.subscribers),
            team: RwLock::new(seed.team),
            settings: RwLock::new(seed.settings),
            messages: RwLock::new(Vec::new()),
            audit: RwLock::new(Vec::new()),
        }
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::new(SeedData::default()))
    }

    pub fn with_demo_content() -> Arc<Self> {
        Arc::new(Self::new(demo_content()))
    }
}

fn newest_first(posts: &mut [PostRecord]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|post| post.slug == params.slug) {
            return Err(RepoError::duplicate(POSTS_SLUG_CONSTRAINT));
        }

        let record = PostRecord {
            id: Uuid::new_v4(),
            slug: params.slug,
            title: params.title,
            author: params.author,
            excerpt: params.excerpt,
            content_html: params.content_html,
            category: params.category,
            tags: params.tags,
            image_url: params.image_url,
            image_hint: params.image_hint,
            published_at: params.published_at,
            updated_at: params.published_at,
        };
        posts.push(record.clone());
        Ok(record)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let record = {
            let mut posts = self.posts.write().await;
            if posts
                .iter()
                .any(|post| post.slug == params.slug && post.id != params.id)
            {
                return Err(RepoError::duplicate(POSTS_SLUG_CONSTRAINT));
            }

            let post = posts
                .iter_mut()
                .find(|post| post.id == params.id)
                .ok_or(RepoError::NotFound)?;

            post.slug = params.slug;
            post.title = params.title;
            post.author = params.author;
            post.excerpt = params.excerpt;
            post.content_html = params.content_html;
            post.category = params.category;
            post.tags = params.tags;
            post.image_url = params.image_url;
            post.image_hint = params.image_hint;
            post.updated_at = OffsetDateTime::now_utc();
            post.clone()
        };

        // Comments keep a copy of the slug for linking back.
        let mut comments = self.comments.write().await;
        for comment in comments.iter_mut().filter(|c| c.post_id == record.id) {
            comment.post_slug = record.slug.clone();
        }

        Ok(record)
    }

    async fn delete_post(&self, id: Uuid) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|post| post.id == id)
            .ok_or(RepoError::NotFound)?;

        // Purged under the posts guard so no comment can attach in between.
        self.comments
            .write()
            .await
            .retain(|comment| comment.post_id != id);

        Ok(posts.remove(index))
    }

    async fn clear_category(&self, category: &str) -> Result<u64, RepoError> {
        let key = category_key(category);
        let mut posts = self.posts.write().await;
        let mut touched = 0;
        for post in posts
            .iter_mut()
            .filter(|post| post.category_key().as_deref() == Some(key.as_str()))
        {
            post.category = None;
            post.updated_at = OffsetDateTime::now_utc();
            touched += 1;
        }
        Ok(touched)
    }
}

#[async_trait]
impl CommentsRepo for InMemoryRepositories {
    async fn list_comments(&self) -> Result<Vec<CommentRecord>, RepoError> {
        let mut comments = self.comments.read().await.clone();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>, RepoError> {
        let mut comments: Vec<CommentRecord> = self
            .comments
            .read()
            .await
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError> {
        // Lock order: posts, then comments.
        let posts = self.posts.read().await;
        if !posts.iter().any(|post| post.id == params.post_id) {
            return Err(RepoError::NotFound);
        }

        let record = CommentRecord {
            id: Uuid::new_v4(),
            post_id: params.post_id,
            post_slug: params.post_slug,
            author_name: params.author_name,
            author_email: params.author_email,
            avatar_url: params.avatar_url,
            text: params.text,
            reply_text: None,
            is_approved: true,
            created_at: OffsetDateTime::now_utc(),
        };
        self.comments.write().await.push(record.clone());
        drop(posts);
        Ok(record)
    }

    async fn set_reply(&self, id: Uuid, reply_text: String) -> Result<CommentRecord, RepoError> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .iter_mut()
            .find(|comment| comment.id == id)
            .ok_or(RepoError::NotFound)?;
        comment.reply_text = Some(reply_text);
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: Uuid) -> Result<CommentRecord, RepoError> {
        let mut comments = self.comments.write().await;
        let index = comments
            .iter()
            .position(|comment| comment.id == id)
            .ok_or(RepoError::NotFound)?;
        Ok(comments.remove(index))
    }
}

#[async_trait]
impl SubscribersRepo for InMemoryRepositories {
    async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, RepoError> {
        let mut subscribers = self.subscribers.read().await.clone();
        subscribers.sort_by(|a, b| a.subscribed_at.cmp(&b.subscribed_at));
        Ok(subscribers)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<SubscriberRecord>, RepoError> {
        let subscribers = self.subscribers.read().await;
        Ok(subscribers
            .iter()
            .find(|subscriber| subscriber.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn create_subscriber(&self, email: &str) -> Result<SubscriberRecord, RepoError> {
        let email = email.trim();
        if email.eq_ignore_ascii_case(SIMULATED_FAILURE_EMAIL) {
            return Err(RepoError::from_persistence(format!(
                "mail provider rejected `{email}`"
            )));
        }

        let mut subscribers = self.subscribers.write().await;
        if subscribers
            .iter()
            .any(|subscriber| subscriber.email.eq_ignore_ascii_case(email))
        {
            return Err(RepoError::duplicate(SUBSCRIBERS_EMAIL_CONSTRAINT));
        }

        let record = SubscriberRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            subscribed_at: OffsetDateTime::now_utc(),
        };
        subscribers.push(record.clone());
        Ok(record)
    }

    async fn delete_subscriber(&self, id: Uuid) -> Result<SubscriberRecord, RepoError> {
        let mut subscribers = self.subscribers.write().await;
        let index = subscribers
            .iter()
            .position(|subscriber| subscriber.id == id)
            .ok_or(RepoError::NotFound)?;
        Ok(subscribers.remove(index))
    }
}

#[async_trait]
impl TeamRepo for InMemoryRepositories {
    async fn list_team(&self) -> Result<Vec<TeamMemberRecord>, RepoError> {
        Ok(self.team.read().await.clone())
    }
}

#[async_trait]
impl SettingsRepo for InMemoryRepositories {
    async fn load_site_settings(&self) -> Result<SiteSettingsRecord, RepoError> {
        Ok(self.settings.read().await.clone())
    }

    async fn upsert_site_settings(&self, settings: SiteSettingsRecord) -> Result<(), RepoError> {
        *self.settings.write().await = settings;
        Ok(())
    }
}

#[async_trait]
impl ContactRepo for InMemoryRepositories {
    async fn append_message(&self, record: ContactMessageRecord) -> Result<(), RepoError> {
        self.messages.write().await.push(record);
        Ok(())
    }

    async fn count_messages(&self) -> Result<u64, RepoError> {
        Ok(self.messages.read().await.len() as u64)
    }
}

#[async_trait]
impl AuditRepo for InMemoryRepositories {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError> {
        self.audit.write().await.push(record);
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditLogRecord>, RepoError> {
        let audit = self.audit.read().await;
        Ok(audit.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_params(slug: &str) -> CreatePostParams {
        CreatePostParams {
            slug: slug.to_string(),
            title: "A title".into(),
            author: "Jane Doe".into(),
            excerpt: "An excerpt long enough.".into(),
            content_html: "<p>Body text here.</p>".into(),
            category: Some("Design".into()),
            tags: vec![],
            image_url: None,
            image_hint: None,
            published_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_on_create_and_update() {
        let repos = InMemoryRepositories::empty();
        let first = repos.create_post(post_params("first")).await.expect("create");
        let second = repos.create_post(post_params("second")).await.expect("create");

        let err = repos
            .create_post(post_params("first"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, RepoError::Duplicate { constraint } if constraint == POSTS_SLUG_CONSTRAINT));

        let clash = UpdatePostParams {
            id: second.id,
            slug: first.slug.clone(),
            title: second.title.clone(),
            author: second.author.clone(),
            excerpt: second.excerpt.clone(),
            content_html: second.content_html.clone(),
            category: None,
            tags: vec![],
            image_url: None,
            image_hint: None,
        };
        assert!(repos.update_post(clash.clone()).await.is_err());

        // Keeping its own slug is fine.
        let own = UpdatePostParams {
            slug: second.slug.clone(),
            ..clash
        };
        assert!(repos.update_post(own).await.is_ok());
    }

    fn comment_params(post: &PostRecord) -> CreateCommentParams {
        CreateCommentParams {
            post_id: post.id,
            post_slug: post.slug.clone(),
            author_name: "Reader".into(),
            author_email: None,
            avatar_url: None,
            text: "Nice".into(),
        }
    }

    #[tokio::test]
    async fn deleting_a_post_removes_its_comments() {
        let repos = InMemoryRepositories::empty();
        let post = repos.create_post(post_params("doomed")).await.expect("create");
        repos
            .create_comment(comment_params(&post))
            .await
            .expect("comment");

        repos.delete_post(post.id).await.expect("delete");
        assert!(repos.list_comments().await.expect("list").is_empty());
        assert!(matches!(
            repos.delete_post(post.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn comments_cannot_attach_to_a_deleted_post() {
        let repos = InMemoryRepositories::empty();
        let post = repos.create_post(post_params("gone")).await.expect("create");
        repos.delete_post(post.id).await.expect("delete");

        let err = repos
            .create_comment(comment_params(&post))
            .await
            .expect_err("post is gone");
        assert!(matches!(err, RepoError::NotFound));
        assert!(repos.list_comments().await.expect("list").is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_comments_and_delete_leave_no_orphans() {
        let repos = InMemoryRepositories::empty();
        let post = repos.create_post(post_params("busy")).await.expect("create");

        let mut writers = Vec::new();
        for _ in 0..32 {
            let repos = repos.clone();
            let params = comment_params(&post);
            writers.push(tokio::spawn(async move { repos.create_comment(params).await }));
        }
        let deleter = {
            let repos = repos.clone();
            let id = post.id;
            tokio::spawn(async move { repos.delete_post(id).await })
        };

        for writer in writers {
            let _ = writer.await.expect("join");
        }
        deleter.await.expect("join").expect("delete");

        let orphans = repos
            .list_comments()
            .await
            .expect("list")
            .into_iter()
            .filter(|comment| comment.post_id == post.id)
            .count();
        assert_eq!(orphans, 0);
    }

    #[tokio::test]
    async fn clearing_a_category_matches_by_key() {
        let repos = InMemoryRepositories::empty();
        repos.create_post(post_params("one")).await.expect("create");
        let mut lower = post_params("two");
        lower.category = Some("design".into());
        repos.create_post(lower).await.expect("create");
        let mut other = post_params("three");
        other.category = Some("Writing".into());
        repos.create_post(other).await.expect("create");

        assert_eq!(repos.clear_category("Design").await.expect("clear"), 2);
        let remaining: Vec<_> = repos
            .list_posts()
            .await
            .expect("list")
            .into_iter()
            .filter_map(|post| post.category)
            .collect();
        assert_eq!(remaining, vec!["Writing".to_string()]);
    }

    #[tokio::test]
    async fn subscriber_emails_are_unique_ignoring_case() {
        let repos = InMemoryRepositories::empty();
        repos
            .create_subscriber("Reader@Example.com")
            .await
            .expect("create");
        assert!(matches!(
            repos.create_subscriber("reader@example.com").await,
            Err(RepoError::Duplicate { .. })
        ));
        assert!(
            repos
                .find_by_email("READER@example.com")
                .await
                .expect("find")
                .is_some()
        );
    }

    #[tokio::test]
    async fn simulated_failure_address_is_refused() {
        let repos = InMemoryRepositories::empty();
        assert!(matches!(
            repos.create_subscriber(SIMULATED_FAILURE_EMAIL).await,
            Err(RepoError::Persistence(_))
        ));
        assert!(repos.list_subscribers().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn demo_content_is_seeded() {
        let repos = InMemoryRepositories::with_demo_content();
        let posts = repos.list_posts().await.expect("posts");
        assert_eq!(posts.len(), 5);
        assert_eq!(posts[0].slug, "first-post-journey-begins");
        assert_eq!(repos.list_team().await.expect("team").len(), 3);
        assert_eq!(repos.list_subscribers().await.expect("subs").len(), 3);
    }
}
