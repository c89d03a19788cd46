use time::OffsetDateTime;
use tracing::info;

use crate::application::forms::PostDraft;
use crate::application::repos::{CreatePostParams, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::error::DomainError;

use super::service::AdminPostService;
use super::types::{AdminPostError, PostSnapshot};

impl AdminPostService {
    pub async fn create_post(
        &self,
        actor: &str,
        draft: PostDraft,
    ) -> Result<PostRecord, AdminPostError> {
        let slug = draft.slug.clone();
        let params = CreatePostParams {
            slug: draft.slug,
            title: draft.title,
            author: draft.author,
            excerpt: draft.excerpt,
            content_html: draft.content_html,
            category: draft.category,
            tags: draft.tags,
            image_url: draft.image.apply(None),
            image_hint: draft.image_hint,
            published_at: OffsetDateTime::now_utc(),
        };

        let post = self
            .writer
            .create_post(params)
            .await
            .map_err(|err| AdminPostError::from_write(err, &slug))?;

        info!(
            target = "quire::application::admin::posts",
            post_id = %post.id,
            slug = %post.slug,
            "Post created"
        );
        self.record(actor, "post.create", &post).await?;

        Ok(post)
    }

    /// Update the post currently stored under `current_slug`; the draft may
    /// carry a new slug.
    pub async fn update_post(
        &self,
        actor: &str,
        current_slug: &str,
        draft: PostDraft,
    ) -> Result<PostRecord, AdminPostError> {
        let existing = self
            .reader
            .find_by_slug(current_slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post"))?;

        let slug = draft.slug.clone();
        let params = UpdatePostParams {
            id: existing.id,
            slug: draft.slug,
            title: draft.title,
            author: draft.author,
            excerpt: draft.excerpt,
            content_html: draft.content_html,
            category: draft.category,
            tags: draft.tags,
            image_url: draft.image.apply(existing.image_url),
            image_hint: draft.image_hint,
        };

        let post = self
            .writer
            .update_post(params)
            .await
            .map_err(|err| AdminPostError::from_write(err, &slug))?;

        info!(
            target = "quire::application::admin::posts",
            post_id = %post.id,
            previous_slug = current_slug,
            slug = %post.slug,
            "Post updated"
        );
        self.record(actor, "post.update", &post).await?;

        Ok(post)
    }

    /// Remove a post and, with it, its comments.
    pub async fn delete_post(&self, actor: &str, slug: &str) -> Result<PostRecord, AdminPostError> {
        let existing = self
            .reader
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post"))?;

        let post = self
            .writer
            .delete_post(existing.id)
            .await
            .map_err(|err| AdminPostError::from_write(err, slug))?;

        info!(
            target = "quire::application::admin::posts",
            post_id = %post.id,
            slug = %post.slug,
            "Post deleted"
        );
        self.record(actor, "post.delete", &post).await?;

        Ok(post)
    }

    async fn record(
        &self,
        actor: &str,
        action: &str,
        post: &PostRecord,
    ) -> Result<(), AdminPostError> {
        let snapshot = PostSnapshot {
            slug: post.slug.as_str(),
            title: post.title.as_str(),
            author: post.author.as_str(),
            category: post.category.as_deref(),
            tags: &post.tags,
        };
        self.audit
            .record(
                actor,
                action,
                "post",
                Some(&post.id.to_string()),
                Some(&snapshot),
            )
            .await?;
        Ok(())
    }
}
