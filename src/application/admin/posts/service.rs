use std::sync::Arc;

use crate::application::admin::audit::AuditService;
use crate::application::repos::{PostsRepo, PostsWriteRepo};

#[derive(Clone)]
pub struct AdminPostService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
    pub(crate) audit: AuditService,
}

impl AdminPostService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        audit: AuditService,
    ) -> Self {
        Self {
            reader,
            writer,
            audit,
        }
    }
}
