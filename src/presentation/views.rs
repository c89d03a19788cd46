use crate::application::error::{ErrorReport, HttpError};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        HttpError::from_error(
            err.source,
            StatusCode::INTERNAL_SERVER_ERROR,
            err.public_message,
            &err.error,
        )
    }
}

/// Render a template to a string, e.g. a form partial embedded in a page or
/// patched in by the relay.
pub fn render_fragment<T: Template>(
    source: &'static str,
    template: &T,
) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new(source, "Template rendering failed", err))
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    render_fragment("presentation::views::render_template", &template)
        .map(Html)
        .map_err(HttpError::from)
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(chrome: LayoutChrome) -> Response {
    let view = LayoutContext::new(chrome, ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// "July 28, 2024"
pub fn format_display_date(value: OffsetDateTime) -> String {
    value
        .format(format_description!(
            "[month repr:long] [day padding:none], [year]"
        ))
        .unwrap_or_default()
}

pub fn format_iso_date(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_default()
}

/// Up to two uppercase initials for avatar placeholders.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: &'static str,
    pub href: &'static str,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct NavigationView {
    pub entries: Vec<NavigationLinkView>,
}

impl NavigationView {
    pub fn public() -> Self {
        let entries = [
            ("Home", "/"),
            ("Blog", "/blogs"),
            ("About", "/about"),
            ("Contact", "/contact"),
        ]
        .into_iter()
        .map(|(label, href)| NavigationLinkView {
            label,
            href,
            is_active: false,
        })
        .collect();
        Self { entries }
    }

    /// Mark the entry for `href` as current.
    pub fn activate(mut self, href: &str) -> Self {
        for entry in &mut self.entries {
            entry.is_active = entry.href == href;
        }
        self
    }
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

#[derive(Clone)]
pub struct FooterView {
    pub copy: String,
    pub description: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct LayoutChrome {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
}

impl LayoutChrome {
    pub fn with_active(self, href: &str) -> Self {
        Self {
            navigation: self.navigation.activate(href),
            ..self
        }
    }

    /// Prefix the document title with a page title.
    pub fn with_page_title(self, page_title: &str) -> Self {
        let title = format!("{page_title} | {}", self.brand.title);
        Self {
            meta: PageMetaView {
                title,
                ..self.meta
            },
            ..self
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub navigation: NavigationView,
    pub footer: FooterView,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            brand: chrome.brand,
            navigation: chrome.navigation,
            footer: chrome.footer,
            meta: chrome.meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published: String,
    pub iso_date: String,
    pub category: Option<String>,
    pub category_href: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
}

#[derive(Clone)]
pub struct TeamMemberCard {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub initials: String,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
}

pub struct HomeContext {
    pub headline: String,
    pub tagline: String,
    pub recent_posts: Vec<PostCard>,
    pub has_more_posts: bool,
    pub team: Vec<TeamMemberCard>,
    pub newsletter_form: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeContext>,
}

#[derive(Clone)]
pub struct CategoryFilterView {
    pub label: String,
    pub href: String,
    pub count: usize,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl PaginationView {
    pub fn is_paged(&self) -> bool {
        self.total_pages > 1
    }
}

pub struct BlogListContext {
    pub posts: Vec<PostCard>,
    pub categories: Vec<CategoryFilterView>,
    pub all_href: String,
    pub is_all_active: bool,
    pub query: String,
    pub active_category: Option<String>,
    pub total_count: usize,
    pub has_results: bool,
    pub pagination: PaginationView,
}

#[derive(Template)]
#[template(path = "blogs.html")]
pub struct BlogListTemplate {
    pub view: LayoutContext<BlogListContext>,
}

#[derive(Clone)]
pub struct ShareLinkView {
    pub label: &'static str,
    pub href: String,
}

#[derive(Clone)]
pub struct CommentView {
    pub author_name: String,
    pub initials: String,
    pub avatar_url: Option<String>,
    pub posted: String,
    pub iso_date: String,
    pub text: String,
    pub reply_text: Option<String>,
}

pub struct PostDetailContext {
    pub card: PostCard,
    pub content_html: String,
    pub related: Vec<PostCard>,
    pub share_links: Vec<ShareLinkView>,
    pub comments: Vec<CommentView>,
    pub comments_enabled: bool,
    /// Pre-rendered [`CommentListTemplate`].
    pub comment_list: String,
    pub comment_form: String,
}

pub const COMMENT_LIST_SELECTOR: &str = "#post-comments";

#[derive(Template)]
#[template(path = "partials/comment_list.html")]
pub struct CommentListTemplate {
    pub comments: Vec<CommentView>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

pub struct AboutContext {
    pub site_name: String,
    pub mission: String,
    pub team: Vec<TeamMemberCard>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<AboutContext>,
}

pub struct ContactContext {
    pub contact_form: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub action_href: String,
    pub action_label: String,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The page you requested does not exist. Try returning to the homepage to continue exploring.".to_string(),
            action_href: "/".to_string(),
            action_label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[derive(Clone)]
pub struct ToastItem {
    pub id: String,
    pub kind: &'static str,
    pub title: String,
    pub text: String,
    pub ttl_ms: u64,
}

#[derive(Template)]
#[template(path = "partials/toast_stack.html")]
pub struct ToastStackTemplate {
    pub toasts: Vec<ToastItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn dates_render_for_humans_and_machines() {
        let value = datetime!(2024-07-08 09:30 UTC);
        assert_eq!(format_display_date(value), "July 8, 2024");
        assert_eq!(format_iso_date(value), "2024-07-08T09:30:00Z");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Eleanor Vance"), "EV");
        assert_eq!(initials("dr. wellness plus"), "DW");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn navigation_marks_one_entry_active() {
        let nav = NavigationView::public().activate("/blogs");
        let active: Vec<_> = nav
            .entries
            .iter()
            .filter(|entry| entry.is_active)
            .map(|entry| entry.label)
            .collect();
        assert_eq!(active, vec!["Blog"]);
    }
}
