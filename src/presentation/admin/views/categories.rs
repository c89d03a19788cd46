use askama::Template;

use super::AdminLayout;

#[derive(Clone)]
pub struct AdminCategoryRowView {
    pub name: String,
    pub post_count: usize,
    pub public_href: String,
    pub delete_action: String,
}

pub struct AdminCategoryListView {
    pub rows: Vec<AdminCategoryRowView>,
}

#[derive(Template)]
#[template(path = "admin/categories.html")]
pub struct AdminCategoriesTemplate {
    pub view: AdminLayout<AdminCategoryListView>,
}

#[derive(Template)]
#[template(path = "admin/categories_panel.html")]
pub struct AdminCategoriesPanelTemplate {
    pub content: AdminCategoryListView,
}
