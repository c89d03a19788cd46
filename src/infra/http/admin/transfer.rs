use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::presentation::{admin::views as admin_views, views::render_template_response};

use super::AdminState;

pub(super) async fn admin_transfer_access(State(state): State<AdminState>) -> Response {
    let chrome = match state
        .chrome
        .admin("Transfer Access", "/admin/transfer-access")
        .await
    {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = admin_views::AdminTransferAccessView {
        heading: "Transfer Admin Access".to_string(),
        body: "Handing the admin area over to another person is not available yet. \
               Access is currently controlled by the server's admin token."
            .to_string(),
    };
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminTransferAccessTemplate { view }, StatusCode::OK)
}
