//! Public reading surface: home page, blog listing and post detail.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use url::{Url, form_urlencoded};

use crate::application::admin::categories::summarize_categories;
use crate::application::error::HttpError;
use crate::application::repos::{
    CommentsRepo, PostsRepo, RepoError, SettingsRepo, TeamRepo,
};
use crate::domain::entities::{CommentRecord, PostRecord, TeamMemberRecord};
use crate::domain::posts::category_key;
use crate::presentation::views::{
    AboutContext, BlogListContext, CategoryFilterView, CommentView, HomeContext,
    PaginationView, PostCard, PostDetailContext, ShareLinkView, TeamMemberCard,
    format_display_date, format_iso_date, initials,
};

const HOME_RECENT_POSTS: usize = 3;
const RELATED_POSTS: usize = 3;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<FeedError> for HttpError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::Repo(err) => HttpError::from_error(
                "application::feed::FeedService",
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
                &err,
            ),
        }
    }
}

/// Listing filters taken from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: usize,
}

impl BlogQuery {
    /// `/blogs` link for `page` keeping the current filters.
    fn href(&self, page: usize) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if let Some(search) = &self.search {
            serializer.append_pair("q", search);
        }
        if page > 1 {
            serializer.append_pair("page", &page.to_string());
        }
        let query = serializer.finish();
        if query.is_empty() {
            "/blogs".to_string()
        } else {
            format!("/blogs?{query}")
        }
    }
}

#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostsRepo>,
    comments: Arc<dyn CommentsRepo>,
    team: Arc<dyn TeamRepo>,
    settings: Arc<dyn SettingsRepo>,
    page_size: usize,
    public_url: Url,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        comments: Arc<dyn CommentsRepo>,
        team: Arc<dyn TeamRepo>,
        settings: Arc<dyn SettingsRepo>,
        page_size: usize,
        public_url: Url,
    ) -> Self {
        Self {
            posts,
            comments,
            team,
            settings,
            page_size: page_size.max(1),
            public_url,
        }
    }

    pub async fn home(&self, newsletter_form: String) -> Result<HomeContext, FeedError> {
        let settings = self.settings.load_site_settings().await?;
        let posts = self.posts.list_posts().await?;
        let team = self.team.list_team().await?;

        Ok(HomeContext {
            headline: format!("Welcome to {}", settings.site_name),
            tagline: settings.site_description,
            has_more_posts: posts.len() > HOME_RECENT_POSTS,
            recent_posts: posts.iter().take(HOME_RECENT_POSTS).map(post_card).collect(),
            team: team.iter().map(team_card).collect(),
            newsletter_form,
        })
    }

    pub async fn about(&self) -> Result<AboutContext, FeedError> {
        let settings = self.settings.load_site_settings().await?;
        let team = self.team.list_team().await?;

        Ok(AboutContext {
            site_name: settings.site_name,
            mission: settings.site_description,
            team: team.iter().map(team_card).collect(),
        })
    }

    pub async fn listing(&self, query: BlogQuery) -> Result<BlogListContext, FeedError> {
        let posts = self.posts.list_posts().await?;

        let categories = summarize_categories(
            posts.iter().filter_map(|post| post.category.as_deref()),
        );

        let matching: Vec<&PostRecord> = posts
            .iter()
            .filter(|post| match &query.category {
                Some(key) => post.category_key().as_deref() == Some(key.as_str()),
                None => true,
            })
            .filter(|post| match &query.search {
                Some(needle) => post.matches_query(needle),
                None => true,
            })
            .collect();

        let total_count = matching.len();
        let total_pages = total_count.div_ceil(self.page_size).max(1);
        let page = query.page.clamp(1, total_pages);

        let cards = matching
            .iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .map(|post| post_card(post))
            .collect::<Vec<_>>();

        let all_query = BlogQuery {
            category: None,
            ..query.clone()
        };
        let filters = categories
            .into_iter()
            .map(|summary| {
                let href = BlogQuery {
                    category: Some(summary.key.clone()),
                    ..all_query.clone()
                }
                .href(1);
                CategoryFilterView {
                    is_active: query.category.as_deref() == Some(summary.key.as_str()),
                    label: summary.name,
                    href,
                    count: summary.post_count,
                }
            })
            .collect();

        let pagination = PaginationView {
            page,
            total_pages,
            prev_href: (page > 1).then(|| query.href(page - 1)),
            next_href: (page < total_pages).then(|| query.href(page + 1)),
        };

        Ok(BlogListContext {
            has_results: !cards.is_empty(),
            posts: cards,
            categories: filters,
            all_href: all_query.href(1),
            is_all_active: query.category.is_none(),
            query: query.search.clone().unwrap_or_default(),
            active_category: query.category.clone(),
            total_count,
            pagination,
        })
    }

    /// Detail context for `slug`. The comment list and form markup are left
    /// empty for the caller to fill in.
    pub async fn detail(&self, slug: &str) -> Result<Option<PostDetailContext>, FeedError> {
        let Some(post) = self.posts.find_by_slug(slug).await? else {
            return Ok(None);
        };

        let settings = self.settings.load_site_settings().await?;
        let mut comments = self.comments.list_for_post(post.id).await?;
        comments.retain(|comment| comment.is_approved);

        let related = match post.category_key() {
            Some(key) => self
                .posts
                .list_posts()
                .await?
                .iter()
                .filter(|candidate| candidate.id != post.id)
                .filter(|candidate| candidate.category_key().as_deref() == Some(key.as_str()))
                .take(RELATED_POSTS)
                .map(post_card)
                .collect(),
            None => Vec::new(),
        };

        Ok(Some(PostDetailContext {
            card: post_card(&post),
            content_html: post.content_html.clone(),
            related,
            share_links: self.share_links(&post),
            comments: comments.iter().map(comment_view).collect(),
            comments_enabled: settings.enable_comments_globally,
            comment_list: String::new(),
            comment_form: String::new(),
        }))
    }

    /// Approved comments for the post under `slug`, oldest first.
    pub async fn comment_views(&self, slug: &str) -> Result<Vec<CommentView>, FeedError> {
        let Some(post) = self.posts.find_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        Ok(self
            .comments
            .list_for_post(post.id)
            .await?
            .iter()
            .filter(|comment| comment.is_approved)
            .map(comment_view)
            .collect())
    }

    fn share_links(&self, post: &PostRecord) -> Vec<ShareLinkView> {
        let post_url = match self.public_url.join(&format!("blogs/{}", post.slug)) {
            Ok(url) => url.to_string(),
            Err(_) => return Vec::new(),
        };

        let mut links = Vec::new();
        let targets: [(&'static str, &str, [(&str, &str); 2]); 2] = [
            (
                "Share on X",
                "https://twitter.com/intent/tweet",
                [("url", post_url.as_str()), ("text", post.title.as_str())],
            ),
            (
                "Share on LinkedIn",
                "https://www.linkedin.com/shareArticle",
                [("url", post_url.as_str()), ("title", post.title.as_str())],
            ),
        ];
        for (label, base, params) in targets {
            if let Ok(url) = Url::parse_with_params(base, params) {
                links.push(ShareLinkView {
                    label,
                    href: url.to_string(),
                });
            }
        }

        let mail_query = form_urlencoded::Serializer::new(String::new())
            .append_pair("subject", &post.title)
            .append_pair("body", &format!("Check out this article: {post_url}"))
            .finish();
        links.push(ShareLinkView {
            label: "Share via Email",
            href: format!("mailto:?{mail_query}"),
        });

        links
    }
}

fn post_card(post: &PostRecord) -> PostCard {
    PostCard {
        slug: post.slug.clone(),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        author: post.author.clone(),
        published: format_display_date(post.published_at),
        iso_date: format_iso_date(post.published_at),
        category_href: post
            .category
            .as_deref()
            .map(|name| format!("/blogs?category={}", category_key(name))),
        category: post.category.clone(),
        tags: post.tags.clone(),
        image_url: post.image_url.clone(),
        image_hint: post.image_hint.clone(),
    }
}

fn team_card(member: &TeamMemberRecord) -> TeamMemberCard {
    TeamMemberCard {
        name: member.name.clone(),
        role: member.role.clone(),
        bio: member.bio.clone(),
        initials: initials(&member.name),
        image_url: member.image_url.clone(),
        image_hint: member.image_hint.clone(),
    }
}

fn comment_view(comment: &CommentRecord) -> CommentView {
    CommentView {
        author_name: comment.author_name.clone(),
        initials: initials(&comment.author_name),
        avatar_url: comment.avatar_url.clone(),
        posted: format_display_date(comment.created_at),
        iso_date: format_iso_date(comment.created_at),
        text: comment.text.clone(),
        reply_text: comment.reply_text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_links_keep_filters() {
        let query = BlogQuery {
            category: Some("personal-growth".into()),
            search: Some("mind & body".into()),
            page: 2,
        };
        assert_eq!(
            query.href(3),
            "/blogs?category=personal-growth&q=mind+%26+body&page=3"
        );
        assert_eq!(BlogQuery::default().href(1), "/blogs");
    }
}
