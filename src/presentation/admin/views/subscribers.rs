use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminSubscriberRowView {
    pub id: String,
    pub email: String,
    pub subscribed: String,
    pub delete_action: String,
}

pub struct AdminSubscriberListView {
    pub rows: Vec<AdminSubscriberRowView>,
}

#[derive(Template)]
#[template(path = "admin/subscribers.html")]
pub struct AdminSubscribersTemplate {
    pub view: AdminLayout<AdminSubscriberListView>,
}

#[derive(Template)]
#[template(path = "admin/subscribers_panel.html")]
pub struct AdminSubscribersPanelTemplate {
    pub content: AdminSubscriberListView,
}
