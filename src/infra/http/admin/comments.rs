use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    application::{
        admin::comments::AdminCommentError,
        error::HttpError,
        forms::{ConfirmForm, ReplyForm},
        mutation::{MutationFailure, MutationOutcome, MutationSuccess},
    },
    infra::http::{
        ADMIN_ACTOR,
        relay::{Patch, is_datastar, json_result, stream_outcome},
    },
    presentation::{
        admin::views as admin_views,
        forms::{FormState, ReplyFormTemplate},
        views::{TemplateRenderError, format_display_date, render_fragment, render_template_response},
    },
};

use super::{
    AdminState,
    shared::{changed, stream_with_panel, unavailable},
};

#[derive(Debug)]
enum CommentListError {
    Load(AdminCommentError),
    Render(TemplateRenderError),
}

impl From<CommentListError> for HttpError {
    fn from(err: CommentListError) -> Self {
        match err {
            CommentListError::Load(err) => unavailable("infra::http::admin::comments", &err),
            CommentListError::Render(err) => err.into(),
        }
    }
}

pub(super) async fn admin_comments(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Comments", "/admin/comments").await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = match build_comment_list_view(&state).await {
        Ok(content) => content,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminCommentsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_comment_reply(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ReplyForm>,
) -> Response {
    let service = state.comments.clone();
    let target = id.clone();
    let outcome = state
        .mutations
        .run("comment.reply", &form, move |draft| async move {
            let Ok(id) = Uuid::parse_str(&target) else {
                return Err(MutationFailure::not_found("Comment not found."));
            };
            service
                .reply(ADMIN_ACTOR, id, draft)
                .await
                .map(|comment| {
                    MutationSuccess::new(format!("Reply to {} saved.", comment.author_name))
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    // Success re-renders the whole panel so the saved reply shows on its row.
    if outcome.is_ok() {
        let panel = match build_comment_list_view(&state).await {
            Ok(content) => render_fragment(
                "infra::http::admin::comment_reply",
                &admin_views::AdminCommentsPanelTemplate { content },
            ),
            Err(err) => return HttpError::from(err).into_response(),
        };
        return stream_with_panel(outcome, Some(panel));
    }

    let form_state = FormState::after(&outcome, form);
    match render_reply_form(&id, form_state) {
        Ok(html) => stream_outcome(
            outcome,
            vec![Patch::new(ReplyFormTemplate::selector_for(&id), html)],
        ),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_comment_delete(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let service = state.comments.clone();
    let outcome: MutationOutcome = state
        .mutations
        .run_confirmed("comment.delete", form.is_confirmed(), &form, move |()| async move {
            let Ok(id) = Uuid::parse_str(&id) else {
                return Err(MutationFailure::not_found("Comment not found."));
            };
            service
                .delete_comment(ADMIN_ACTOR, id)
                .await
                .map(|comment| {
                    MutationSuccess::new(format!("Comment by {} deleted.", comment.author_name))
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let panel = if changed(&outcome) {
        match build_comment_list_view(&state).await {
            Ok(content) => Some(render_fragment(
                "infra::http::admin::comment_delete",
                &admin_views::AdminCommentsPanelTemplate { content },
            )),
            Err(err) => return HttpError::from(err).into_response(),
        }
    } else {
        None
    };
    stream_with_panel(outcome, panel)
}

async fn build_comment_list_view(
    state: &AdminState,
) -> Result<admin_views::AdminCommentListView, CommentListError> {
    let comments = state
        .comments
        .list_comments()
        .await
        .map_err(CommentListError::Load)?;

    let mut rows = Vec::with_capacity(comments.len());
    for comment in comments {
        let id = comment.id.to_string();
        let reply_form = render_reply_form(
            &id,
            FormState::with_values(ReplyForm {
                reply_text: comment.reply_text.clone().unwrap_or_default(),
            }),
        )
        .map_err(CommentListError::Render)?;

        rows.push(admin_views::AdminCommentRowView {
            delete_action: format!("/admin/comments/{id}/delete"),
            post_href: format!("/blogs/{}", comment.post_slug),
            posted: format_display_date(comment.created_at),
            id,
            author_name: comment.author_name,
            author_email: comment.author_email,
            text: comment.text,
            post_slug: comment.post_slug,
            reply_text: comment.reply_text,
            reply_form,
        });
    }
    Ok(admin_views::AdminCommentListView { rows })
}

fn render_reply_form(
    comment_id: &str,
    form: FormState<ReplyForm>,
) -> Result<String, TemplateRenderError> {
    render_fragment(
        "infra::http::admin::render_reply_form",
        &ReplyFormTemplate {
            comment_id: comment_id.to_string(),
            form,
        },
    )
}
