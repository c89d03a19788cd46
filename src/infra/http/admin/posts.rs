use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    application::{
        admin::posts::AdminPostError,
        error::HttpError,
        forms::{ConfirmForm, PostForm},
        mutation::{FollowUp, MutationFailure, MutationOutcome, MutationSuccess},
    },
    domain::entities::PostRecord,
    infra::{
        editor::{ContentEditor, EditorBinding},
        http::{
            ADMIN_ACTOR,
            relay::{Patch, is_datastar, json_result, stream_outcome},
        },
    },
    presentation::{
        admin::views as admin_views,
        forms::{FormState, POST_FORM_SELECTOR, PostFormTemplate},
        views::{
            TemplateRenderError, format_display_date, render_fragment, render_not_found_response,
            render_template_response,
        },
    },
};

use super::{
    AdminState,
    shared::{changed, stream_with_panel, unavailable},
};

const POSTS_HREF: &str = "/admin/posts";
const NEW_POST_ACTION: &str = "/admin/posts/new";

pub(super) async fn admin_posts(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Posts", POSTS_HREF).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let content = match build_post_list_view(&state).await {
        Ok(content) => content,
        Err(err) => return unavailable("infra::http::admin::posts", &err).into_response(),
    };

    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_post_new(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("New Post", POSTS_HREF).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let form_html = match render_post_form(
        state.editor.as_ref(),
        NEW_POST_ACTION.to_string(),
        None,
        FormState::empty(),
    ) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let content = admin_views::AdminPostEditorView {
        heading: "Create New Post".to_string(),
        description: "Fill in the details below to publish a new article.".to_string(),
        form_html,
    };
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostEditorTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_post_create(
    State(state): State<AdminState>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Response {
    let service = state.posts.clone();
    let outcome = state
        .mutations
        .run("post.create", &form, move |draft| async move {
            service
                .create_post(ADMIN_ACTOR, draft)
                .await
                .map(|post| {
                    MutationSuccess::new(format!("Post \"{}\" created successfully.", post.title))
                        .with_follow_up(FollowUp::NewPostSlug(post.slug))
                        .redirect_to(POSTS_HREF)
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let form_state = FormState::after(&outcome, form);
    match render_post_form(
        state.editor.as_ref(),
        NEW_POST_ACTION.to_string(),
        None,
        form_state,
    ) {
        Ok(html) => stream_outcome(outcome, vec![Patch::new(POST_FORM_SELECTOR, html)]),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_post_edit(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
) -> Response {
    let post = match state.posts.find_by_slug(&slug).await {
        Ok(Some(post)) => post,
        Ok(None) => return post_not_found(&state).await,
        Err(err) => return unavailable("infra::http::admin::post_edit", &err).into_response(),
    };

    let chrome = match state.chrome.admin("Edit Post", POSTS_HREF).await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let form_html = match render_post_form(
        state.editor.as_ref(),
        edit_action(&post.slug),
        post.image_url.clone(),
        FormState::with_values(form_from_post(&post)),
    ) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let content = admin_views::AdminPostEditorView {
        heading: format!("Edit Post: {}", post.title),
        description: "Update the post details below.".to_string(),
        form_html,
    };
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminPostEditorTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_post_update(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(form): Form<PostForm>,
) -> Response {
    let service = state.posts.clone();
    let current = slug.clone();
    let outcome = state
        .mutations
        .run("post.update", &form, move |draft| async move {
            service
                .update_post(ADMIN_ACTOR, &current, draft)
                .await
                .map(|post| {
                    MutationSuccess::new(format!("Post \"{}\" updated successfully.", post.title))
                        .with_follow_up(FollowUp::UpdatedPostSlug(post.slug))
                        .redirect_to(POSTS_HREF)
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    // The edit form's resting state is the stored post, under its new slug
    // when the update renamed it.
    let stored_slug = match &outcome {
        Ok(MutationSuccess {
            follow_up: Some(FollowUp::UpdatedPostSlug(updated)),
            ..
        }) => updated.clone(),
        _ => slug,
    };
    let stored = match state.posts.find_by_slug(&stored_slug).await {
        Ok(post) => post,
        Err(err) => return unavailable("infra::http::admin::post_update", &err).into_response(),
    };

    let form_state = match (&outcome, &stored) {
        (Ok(_), Some(post)) => FormState::with_values(form_from_post(post)),
        _ => FormState::after(&outcome, form),
    };
    let existing_image = stored.as_ref().and_then(|post| post.image_url.clone());

    match render_post_form(
        state.editor.as_ref(),
        edit_action(&stored_slug),
        existing_image,
        form_state,
    ) {
        Ok(html) => stream_outcome(outcome, vec![Patch::new(POST_FORM_SELECTOR, html)]),
        Err(err) => HttpError::from(err).into_response(),
    }
}

pub(super) async fn admin_post_delete(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let service = state.posts.clone();
    let target = slug.clone();
    let outcome: MutationOutcome = state
        .mutations
        .run_confirmed("post.delete", form.is_confirmed(), &form, move |()| async move {
            service
                .delete_post(ADMIN_ACTOR, &target)
                .await
                .map(|post| MutationSuccess::new(format!("Post \"{}\" deleted.", post.title)))
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let panel = if changed(&outcome) {
        match build_post_list_view(&state).await {
            Ok(content) => Some(render_fragment(
                "infra::http::admin::post_delete",
                &admin_views::AdminPostsPanelTemplate { content },
            )),
            Err(err) => {
                return unavailable("infra::http::admin::post_delete", &err).into_response();
            }
        }
    } else {
        None
    };
    stream_with_panel(outcome, panel)
}

async fn build_post_list_view(
    state: &AdminState,
) -> Result<admin_views::AdminPostListView, AdminPostError> {
    let posts = state.posts.list_posts().await?;
    let rows = posts
        .iter()
        .map(|post| admin_views::AdminPostRowView {
            slug: post.slug.clone(),
            title: post.title.clone(),
            author: post.author.clone(),
            category: post.category.clone(),
            published: format_display_date(post.published_at),
            public_href: format!("/blogs/{}", post.slug),
            edit_href: edit_action(&post.slug),
            delete_action: format!("/admin/posts/{}/delete", post.slug),
        })
        .collect();
    Ok(admin_views::AdminPostListView { rows })
}

fn render_post_form(
    editor: &dyn ContentEditor,
    action: String,
    existing_image_url: Option<String>,
    form: FormState<PostForm>,
) -> Result<String, TemplateRenderError> {
    let submit_label = if action == NEW_POST_ACTION {
        "Create Post"
    } else {
        "Save Changes"
    };
    let editor_html = editor.render(&EditorBinding {
        field: "content",
        value: form.values.content.clone(),
    })?;
    render_fragment(
        "infra::http::admin::render_post_form",
        &PostFormTemplate {
            action,
            submit_label,
            existing_image_url,
            editor_html,
            form,
        },
    )
}

fn edit_action(slug: &str) -> String {
    format!("/admin/posts/{slug}/edit")
}

/// Edit-form values for a stored post. The stored image is kept unless the
/// editor picks another source.
fn form_from_post(post: &PostRecord) -> PostForm {
    let image_url = post
        .image_url
        .as_deref()
        .filter(|url| !url.starts_with("data:"))
        .unwrap_or_default()
        .to_string();

    PostForm {
        title: post.title.clone(),
        slug: post.slug.clone(),
        author: post.author.clone(),
        category: post.category.clone().unwrap_or_default(),
        tags: post.tags.join(", "),
        excerpt: post.excerpt.clone(),
        image_url,
        image_data_uri: String::new(),
        image_hint: post.image_hint.clone().unwrap_or_default(),
        image_source: "existing".to_string(),
        content: post.content_html.clone(),
    }
}

async fn post_not_found(state: &AdminState) -> Response {
    match state.chrome.load().await {
        Ok(chrome) => render_not_found_response(chrome.with_page_title("Post not found")),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::editor::TextareaEditor;
    use time::macros::datetime;
    use uuid::Uuid;

    #[test]
    fn edit_form_keeps_stored_image() {
        let post = PostRecord {
            id: Uuid::new_v4(),
            slug: "hello-world".into(),
            title: "Hello World".into(),
            author: "Jane Doe".into(),
            excerpt: "A first post to say hello.".into(),
            content_html: "<p>Body text here.</p>".into(),
            category: None,
            tags: vec!["intro".into(), "welcome".into()],
            image_url: Some("data:image/png;base64,AAAA".into()),
            image_hint: None,
            published_at: datetime!(2024-07-28 00:00 UTC),
            updated_at: datetime!(2024-07-28 00:00 UTC),
        };

        let form = form_from_post(&post);
        assert_eq!(form.tags, "intro, welcome");
        assert_eq!(form.image_url, "");
        assert_eq!(form.image_source, "existing");
    }

    struct BrokenEditor;

    impl ContentEditor for BrokenEditor {
        fn render(&self, _binding: &EditorBinding) -> Result<String, TemplateRenderError> {
            Err(TemplateRenderError::new(
                "tests",
                "Template rendering failed",
                askama::Error::Fmt,
            ))
        }
    }

    #[test]
    fn editor_failure_fails_the_form() {
        let result = render_post_form(
            &BrokenEditor,
            NEW_POST_ACTION.to_string(),
            None,
            FormState::empty(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn post_form_embeds_the_editor() {
        let html = render_post_form(
            &TextareaEditor,
            NEW_POST_ACTION.to_string(),
            None,
            FormState::empty(),
        )
        .expect("render");
        assert!(html.contains("name=\"content\""));
        assert!(html.contains("Create Post"));
    }
}
