use askama::Template;

use super::AdminLayout;

pub struct AdminTransferAccessView {
    pub heading: String,
    pub body: String,
}

#[derive(Template)]
#[template(path = "admin/transfer_access.html")]
pub struct AdminTransferAccessTemplate {
    pub view: AdminLayout<AdminTransferAccessView>,
}
