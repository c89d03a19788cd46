use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminPostRowView {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub published: String,
    pub public_href: String,
    pub edit_href: String,
    pub delete_action: String,
}

pub struct AdminPostListView {
    pub rows: Vec<AdminPostRowView>,
}

#[derive(Template)]
#[template(path = "admin/posts.html")]
pub struct AdminPostsTemplate {
    pub view: AdminLayout<AdminPostListView>,
}

#[derive(Template)]
#[template(path = "admin/posts_panel.html")]
pub struct AdminPostsPanelTemplate {
    pub content: AdminPostListView,
}

pub struct AdminPostEditorView {
    pub heading: String,
    pub description: String,
    pub form_html: String,
}

#[derive(Template)]
#[template(path = "admin/post_editor.html")]
pub struct AdminPostEditorTemplate {
    pub view: AdminLayout<AdminPostEditorView>,
}
