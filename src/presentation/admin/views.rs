//! View models for the admin area.

mod access;
mod categories;
mod comments;
mod dashboard;
mod posts;
mod settings;
mod subscribers;

pub use access::*;
pub use categories::*;
pub use comments::*;
pub use dashboard::*;
pub use posts::*;
pub use settings::*;
pub use subscribers::*;

/// Selector of the list panel re-rendered after row actions.
pub const ADMIN_PANEL_SELECTOR: &str = "#admin-panel";

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: &'static str,
    pub href: &'static str,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub site_name: String,
    pub page_title: String,
    pub navigation: Vec<AdminNavigationItemView>,
}

const ADMIN_NAVIGATION: [(&str, &str); 7] = [
    ("Dashboard", "/admin/dashboard"),
    ("Posts", "/admin/posts"),
    ("Categories", "/admin/categories"),
    ("Comments", "/admin/comments"),
    ("Subscribers", "/admin/subscribers"),
    ("Settings", "/admin/settings"),
    ("Transfer Access", "/admin/transfer-access"),
];

impl AdminChrome {
    /// Chrome for a page living under `active_href`.
    pub fn new(site_name: String, page_title: &str, active_href: &str) -> Self {
        let navigation = ADMIN_NAVIGATION
            .into_iter()
            .map(|(label, href)| AdminNavigationItemView {
                label,
                href,
                is_active: active_href.starts_with(href),
            })
            .collect();
        Self {
            site_name,
            page_title: page_title.to_string(),
            navigation,
        }
    }
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self { chrome, content }
    }
}
