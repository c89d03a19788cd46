use std::sync::Arc;

use axum::{
    Router,
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    application::{
        chrome::ChromeService,
        comments::CommentService,
        contact::{CONTACT_SUCCESS_MESSAGE, ContactService},
        error::HttpError,
        feed::{BlogQuery, FeedService},
        forms::{CommentForm, ContactForm, NewsletterForm},
        mutation::{MutationFailure, MutationRunner, MutationSuccess},
        newsletter::{NewsletterService, SubscribeOutcome},
        validation::blank_to_none,
    },
    presentation::{
        forms::{
            COMMENT_FORM_SELECTOR, CONTACT_FORM_SELECTOR, CommentFormTemplate,
            ContactFormTemplate, FormState, NEWSLETTER_FORM_SELECTOR, NewsletterFormTemplate,
        },
        views::{
            AboutTemplate, BlogListTemplate, COMMENT_LIST_SELECTOR, CommentListTemplate, CommentView,
            ContactContext, ContactTemplate, IndexTemplate, LayoutContext,
            PostTemplate, TemplateRenderError, render_fragment, render_not_found_response,
            render_template_response,
        },
    },
};

use super::{
    RouterState, VISITOR_ACTOR,
    relay::{Patch, is_datastar, json_result, stream_outcome},
};

#[derive(Clone)]
pub struct HttpState {
    pub feed: Arc<FeedService>,
    pub chrome: Arc<ChromeService>,
    pub newsletter: Arc<NewsletterService>,
    pub contact: Arc<ContactService>,
    pub comments: Arc<CommentService>,
    pub mutations: MutationRunner,
}

pub(super) fn public_routes() -> Router<RouterState> {
    Router::new()
        .route("/", get(index))
        .route("/blogs", get(blog_list))
        .route("/blogs/{slug}", get(blog_detail))
        .route("/blogs/{slug}/comments", post(comment_create))
        .route("/about", get(about))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/newsletter", post(newsletter_subscribe))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BlogListParams {
    category: Option<String>,
    q: Option<String>,
    page: Option<String>,
}

impl BlogListParams {
    fn into_query(self) -> BlogQuery {
        BlogQuery {
            category: self.category.as_deref().and_then(blank_to_none),
            search: self.q.as_deref().and_then(blank_to_none),
            page: self
                .page
                .as_deref()
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .unwrap_or(1),
        }
    }
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = match state.chrome.load().await {
        Ok(chrome) => chrome.with_active("/"),
        Err(err) => return err.into_response(),
    };

    let newsletter_form = match render_fragment(
        "infra::http::public::index",
        &NewsletterFormTemplate {
            form: FormState::empty(),
        },
    ) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    match state.feed.home(newsletter_form).await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn blog_list(
    State(state): State<HttpState>,
    Query(params): Query<BlogListParams>,
) -> Response {
    let chrome = match state.chrome.load().await {
        Ok(chrome) => chrome.with_active("/blogs").with_page_title("Blog"),
        Err(err) => return err.into_response(),
    };

    match state.feed.listing(params.into_query()).await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(BlogListTemplate { view }, StatusCode::OK)
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn blog_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let chrome = match state.chrome.load().await {
        Ok(chrome) => chrome.with_active("/blogs"),
        Err(err) => return err.into_response(),
    };

    let mut content = match state.feed.detail(&slug).await {
        Ok(Some(content)) => content,
        Ok(None) => return render_not_found_response(chrome),
        Err(err) => return HttpError::from(err).into_response(),
    };

    let fragments = render_comment_list(content.comments.clone()).and_then(|list| {
        let form = render_fragment(
            "infra::http::public::blog_detail",
            &CommentFormTemplate {
                action: comment_action(&slug),
                enabled: content.comments_enabled,
                form: FormState::empty(),
            },
        )?;
        Ok((list, form))
    });
    match fragments {
        Ok((list, form)) => {
            content.comment_list = list;
            content.comment_form = form;
        }
        Err(err) => return HttpError::from(err).into_response(),
    }

    let chrome = chrome.with_page_title(&content.card.title);
    let view = LayoutContext::new(chrome, content);
    render_template_response(PostTemplate { view }, StatusCode::OK)
}

async fn about(State(state): State<HttpState>) -> Response {
    let chrome = match state.chrome.load().await {
        Ok(chrome) => chrome.with_active("/about").with_page_title("About"),
        Err(err) => return err.into_response(),
    };

    match state.feed.about().await {
        Ok(content) => {
            let view = LayoutContext::new(chrome, content);
            render_template_response(AboutTemplate { view }, StatusCode::OK)
        }
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn contact_page(State(state): State<HttpState>) -> Response {
    let chrome = match state.chrome.load().await {
        Ok(chrome) => chrome.with_active("/contact").with_page_title("Contact"),
        Err(err) => return err.into_response(),
    };

    let contact_form = match render_fragment(
        "infra::http::public::contact_page",
        &ContactFormTemplate {
            form: FormState::empty(),
        },
    ) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let view = LayoutContext::new(chrome, ContactContext { contact_form });
    render_template_response(ContactTemplate { view }, StatusCode::OK)
}

async fn newsletter_subscribe(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Form(form): Form<NewsletterForm>,
) -> Response {
    let service = state.newsletter.clone();
    let outcome = state
        .mutations
        .run("newsletter.subscribe", &form, move |signup| async move {
            service
                .subscribe(VISITOR_ACTOR, signup)
                .await
                .map(SubscribeOutcome::into_success)
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let template = NewsletterFormTemplate {
        form: FormState::after(&outcome, form),
    };
    match render_fragment("infra::http::public::newsletter_subscribe", &template) {
        Ok(html) => stream_outcome(outcome, vec![Patch::new(NEWSLETTER_FORM_SELECTOR, html)]),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn contact_submit(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Response {
    let service = state.contact.clone();
    let outcome = state
        .mutations
        .run("contact.submit", &form, move |submission| async move {
            service
                .submit(VISITOR_ACTOR, submission)
                .await
                .map(|_| MutationSuccess::new(CONTACT_SUCCESS_MESSAGE))
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let template = ContactFormTemplate {
        form: FormState::after(&outcome, form),
    };
    match render_fragment("infra::http::public::contact_submit", &template) {
        Ok(html) => stream_outcome(outcome, vec![Patch::new(CONTACT_FORM_SELECTOR, html)]),
        Err(err) => HttpError::from(err).into_response(),
    }
}

async fn comment_create(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Form(form): Form<CommentForm>,
) -> Response {
    let service = state.comments.clone();
    let target = slug.clone();
    let outcome = state
        .mutations
        .run("comment.create", &form, move |draft| async move {
            service
                .add_comment(VISITOR_ACTOR, &target, draft)
                .await
                .map(|comment| {
                    MutationSuccess::new(format!(
                        "Thanks, {}! Your comment has been posted.",
                        comment.author_name
                    ))
                })
                .map_err(MutationFailure::from)
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let enabled = match state.comments.comments_enabled().await {
        Ok(enabled) => enabled,
        Err(err) => return HttpError::from(err).into_response(),
    };
    let mut patches = Vec::new();

    let form_html = match render_fragment(
        "infra::http::public::comment_create",
        &CommentFormTemplate {
            action: comment_action(&slug),
            enabled,
            form: FormState::after(&outcome, form),
        },
    ) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };
    patches.push(Patch::new(COMMENT_FORM_SELECTOR, form_html));

    if outcome.is_ok() {
        let comments = match state.feed.comment_views(&slug).await {
            Ok(comments) => comments,
            Err(err) => return HttpError::from(err).into_response(),
        };
        match render_comment_list(comments) {
            Ok(html) => patches.push(Patch::new(COMMENT_LIST_SELECTOR, html)),
            Err(err) => return HttpError::from(err).into_response(),
        }
    }

    stream_outcome(outcome, patches)
}

pub(super) async fn fallback(State(state): State<HttpState>) -> Response {
    match state.chrome.load().await {
        Ok(chrome) => render_not_found_response(chrome),
        Err(err) => err.into_response(),
    }
}

fn comment_action(slug: &str) -> String {
    format!("/blogs/{slug}/comments")
}

fn render_comment_list(comments: Vec<CommentView>) -> Result<String, TemplateRenderError> {
    render_fragment(
        "infra::http::public::render_comment_list",
        &CommentListTemplate { comments },
    )
}
