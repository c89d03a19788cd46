use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminMetricView {
    pub label: &'static str,
    pub value: u64,
    pub href: &'static str,
}

#[derive(Clone)]
pub struct AdminActivityView {
    pub action: String,
    pub entity_type: String,
    pub actor: String,
    pub when: String,
    pub iso_date: String,
}

#[derive(Clone)]
pub struct AdminRecentPostView {
    pub title: String,
    pub published: String,
    pub edit_href: String,
}

pub struct AdminDashboardView {
    pub metrics: Vec<AdminMetricView>,
    pub recent_posts: Vec<AdminRecentPostView>,
    pub activity: Vec<AdminActivityView>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub view: AdminLayout<AdminDashboardView>,
}
