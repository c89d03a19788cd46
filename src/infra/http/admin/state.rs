use std::sync::Arc;

use crate::application::admin::{
    categories::AdminCategoryService, comments::AdminCommentService,
    dashboard::DashboardService, posts::AdminPostService, settings::AdminSettingsService,
    subscribers::AdminSubscriberService,
};
use crate::application::chrome::ChromeService;
use crate::application::mutation::MutationRunner;
use crate::infra::editor::ContentEditor;
use crate::infra::http::access::AdminAccessPolicy;

#[derive(Clone)]
pub struct AdminState {
    pub chrome: Arc<ChromeService>,
    pub dashboard: Arc<DashboardService>,
    pub posts: Arc<AdminPostService>,
    pub categories: Arc<AdminCategoryService>,
    pub comments: Arc<AdminCommentService>,
    pub subscribers: Arc<AdminSubscriberService>,
    pub settings: Arc<AdminSettingsService>,
    pub editor: Arc<dyn ContentEditor>,
    pub access: Arc<dyn AdminAccessPolicy>,
    pub mutations: MutationRunner,
}
