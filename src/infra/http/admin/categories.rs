use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    application::{
        admin::categories::AdminCategoryError,
        forms::ConfirmForm,
        mutation::{MutationFailure, MutationOutcome, MutationSuccess},
    },
    infra::http::{
        ADMIN_ACTOR,
        relay::{is_datastar, json_result},
    },
    presentation::{
        admin::views as admin_views,
        views::{render_fragment, render_template_response},
    },
};

use super::{
    AdminState,
    shared::{changed, stream_with_panel, unavailable},
};

pub(super) async fn admin_categories(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Categories", "/admin/categories").await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = match build_category_list_view(&state).await {
        Ok(content) => content,
        Err(err) => return unavailable("infra::http::admin::categories", &err).into_response(),
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminCategoriesTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_category_delete(
    State(state): State<AdminState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let service = state.categories.clone();
    let outcome: MutationOutcome = state
        .mutations
        .run_confirmed("category.delete", form.is_confirmed(), &form, move |()| async move {
            service
                .delete_category(ADMIN_ACTOR, &key)
                .await
                .map(|removal| {
                    MutationSuccess::new(format!(
                        "Category \"{}\" removed from {} post(s).",
                        removal.name, removal.posts_updated
                    ))
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let panel = if changed(&outcome) {
        match build_category_list_view(&state).await {
            Ok(content) => Some(render_fragment(
                "infra::http::admin::category_delete",
                &admin_views::AdminCategoriesPanelTemplate { content },
            )),
            Err(err) => {
                return unavailable("infra::http::admin::category_delete", &err).into_response();
            }
        }
    } else {
        None
    };
    stream_with_panel(outcome, panel)
}

async fn build_category_list_view(
    state: &AdminState,
) -> Result<admin_views::AdminCategoryListView, AdminCategoryError> {
    let rows = state
        .categories
        .list_categories()
        .await?
        .into_iter()
        .map(|summary| admin_views::AdminCategoryRowView {
            public_href: format!("/blogs?category={}", summary.key),
            delete_action: format!("/admin/categories/{}/delete", summary.key),
            name: summary.name,
            post_count: summary.post_count,
        })
        .collect();
    Ok(admin_views::AdminCategoryListView { rows })
}
