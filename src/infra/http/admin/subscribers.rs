use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    application::{
        admin::subscribers::AdminSubscriberError,
        forms::ConfirmForm,
        mutation::{MutationFailure, MutationOutcome, MutationSuccess},
    },
    infra::http::{
        ADMIN_ACTOR,
        relay::{is_datastar, json_result},
    },
    presentation::{
        admin::views as admin_views,
        views::{format_display_date, render_fragment, render_template_response},
    },
};

use super::{
    AdminState,
    shared::{changed, stream_with_panel, unavailable},
};

pub(super) async fn admin_subscribers(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Subscribers", "/admin/subscribers").await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = match build_subscriber_list_view(&state).await {
        Ok(content) => content,
        Err(err) => return unavailable("infra::http::admin::subscribers", &err).into_response(),
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminSubscribersTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_subscriber_delete(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let service = state.subscribers.clone();
    let outcome: MutationOutcome = state
        .mutations
        .run_confirmed("subscriber.delete", form.is_confirmed(), &form, move |()| async move {
            let Ok(id) = Uuid::parse_str(&id) else {
                return Err(MutationFailure::not_found("Subscriber not found."));
            };
            service
                .remove(ADMIN_ACTOR, id)
                .await
                .map(|subscriber| {
                    MutationSuccess::new(format!("Subscriber {} removed.", subscriber.email))
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let panel = if changed(&outcome) {
        match build_subscriber_list_view(&state).await {
            Ok(content) => Some(render_fragment(
                "infra::http::admin::subscriber_delete",
                &admin_views::AdminSubscribersPanelTemplate { content },
            )),
            Err(err) => {
                return unavailable("infra::http::admin::subscriber_delete", &err).into_response();
            }
        }
    } else {
        None
    };
    stream_with_panel(outcome, panel)
}

async fn build_subscriber_list_view(
    state: &AdminState,
) -> Result<admin_views::AdminSubscriberListView, AdminSubscriberError> {
    let rows = state
        .subscribers
        .list_subscribers()
        .await?
        .into_iter()
        .map(|subscriber| admin_views::AdminSubscriberRowView {
            id: subscriber.id.to_string(),
            delete_action: format!("/admin/subscribers/{}/delete", subscriber.id),
            subscribed: format_display_date(subscriber.subscribed_at),
            email: subscriber.email,
        })
        .collect();
    Ok(admin_views::AdminSubscriberListView { rows })
}
