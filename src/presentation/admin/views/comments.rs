use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminCommentRowView {
    pub id: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub text: String,
    pub post_slug: String,
    pub post_href: String,
    pub posted: String,
    pub reply_text: Option<String>,
    pub reply_form: String,
    pub delete_action: String,
}

pub struct AdminCommentListView {
    pub rows: Vec<AdminCommentRowView>,
}

#[derive(Template)]
#[template(path = "admin/comments.html")]
pub struct AdminCommentsTemplate {
    pub view: AdminLayout<AdminCommentListView>,
}

#[derive(Template)]
#[template(path = "admin/comments_panel.html")]
pub struct AdminCommentsPanelTemplate {
    pub content: AdminCommentListView,
}
