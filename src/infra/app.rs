//! Wires the in-memory store, the services and the HTTP state together.

use std::sync::Arc;

use axum::Router;

use crate::{
    application::{
        admin::{
            audit::AuditService, categories::AdminCategoryService,
            comments::AdminCommentService, dashboard::DashboardService,
            posts::AdminPostService, settings::AdminSettingsService,
            subscribers::AdminSubscriberService,
        },
        chrome::ChromeService,
        comments::CommentService,
        contact::ContactService,
        feed::FeedService,
        mutation::MutationRunner,
        newsletter::NewsletterService,
        repos::{
            AuditRepo, CommentsRepo, ContactRepo, PostsRepo, PostsWriteRepo, SettingsRepo,
            SubscribersRepo, TeamRepo,
        },
    },
    config::Settings,
    infra::{
        editor,
        error::InfraError,
        http::{self, AdminState, HttpState, RouterState, access},
        memory::InMemoryRepositories,
    },
};

pub struct ApplicationContext {
    pub http_state: HttpState,
    pub admin_state: AdminState,
}

pub fn build_application_context(
    repositories: Arc<InMemoryRepositories>,
    settings: &Settings,
) -> Result<ApplicationContext, InfraError> {
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let posts_write_repo: Arc<dyn PostsWriteRepo> = repositories.clone();
    let comments_repo: Arc<dyn CommentsRepo> = repositories.clone();
    let subscribers_repo: Arc<dyn SubscribersRepo> = repositories.clone();
    let team_repo: Arc<dyn TeamRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories.clone();
    let contact_repo: Arc<dyn ContactRepo> = repositories.clone();
    let audit_repo: Arc<dyn AuditRepo> = repositories;

    let audit = AuditService::new(audit_repo);
    let mutations = MutationRunner::new(settings.mutations.simulated_latency);
    let chrome = Arc::new(ChromeService::new(settings_repo.clone()));

    let feed = Arc::new(FeedService::new(
        posts_repo.clone(),
        comments_repo.clone(),
        team_repo,
        settings_repo.clone(),
        settings.site.blog_page_size.get(),
        settings.site.public_url.clone(),
    ));
    let newsletter = Arc::new(NewsletterService::new(
        subscribers_repo.clone(),
        audit.clone(),
    ));
    let contact = Arc::new(ContactService::new(contact_repo.clone(), audit.clone()));
    let comments = Arc::new(CommentService::new(
        posts_repo.clone(),
        comments_repo.clone(),
        settings_repo.clone(),
        audit.clone(),
    ));

    let http_state = HttpState {
        feed,
        chrome: chrome.clone(),
        newsletter,
        contact,
        comments,
        mutations: mutations.clone(),
    };

    let admin_state = AdminState {
        chrome,
        dashboard: Arc::new(DashboardService::new(
            posts_repo.clone(),
            comments_repo.clone(),
            subscribers_repo.clone(),
            contact_repo,
            audit.clone(),
        )),
        posts: Arc::new(AdminPostService::new(
            posts_repo.clone(),
            posts_write_repo.clone(),
            audit.clone(),
        )),
        categories: Arc::new(AdminCategoryService::new(
            posts_repo,
            posts_write_repo,
            audit.clone(),
        )),
        comments: Arc::new(AdminCommentService::new(comments_repo, audit.clone())),
        subscribers: Arc::new(AdminSubscriberService::new(subscribers_repo, audit.clone())),
        settings: Arc::new(AdminSettingsService::new(settings_repo, audit)),
        editor: editor::from_settings(&settings.editor)?,
        access: access::policy_from_settings(&settings.admin),
        mutations,
    };

    Ok(ApplicationContext {
        http_state,
        admin_state,
    })
}

/// Full router over `repositories`, ready to serve.
pub fn build_app(
    repositories: Arc<InMemoryRepositories>,
    settings: &Settings,
) -> Result<Router, InfraError> {
    let context = build_application_context(repositories, settings)?;
    let state = RouterState {
        http: context.http_state,
        admin: context.admin_state,
    };
    let body_limit = usize::try_from(settings.uploads.max_request_bytes.get()).unwrap_or(usize::MAX);
    Ok(http::build_router(state, body_limit))
}
