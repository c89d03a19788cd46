use askama::Template;

use super::AdminLayout;

pub struct AdminSettingsView {
    pub updated_at: String,
    pub form_html: String,
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct AdminSettingsTemplate {
    pub view: AdminLayout<AdminSettingsView>,
}
