//! Contact-form messages.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::application::admin::audit::AuditService;
use crate::application::forms::ContactSubmission;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{ContactRepo, RepoError};
use crate::domain::entities::ContactMessageRecord;

pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Thank you for your message! We will get back to you soon.";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<ContactError> for MutationFailure {
    fn from(_: ContactError) -> Self {
        MutationFailure::failed("Failed to send your message. Please try again later.")
    }
}

#[derive(Debug, Serialize)]
struct MessageSnapshot<'a> {
    name: &'a str,
    email: &'a str,
    length: usize,
}

#[derive(Clone)]
pub struct ContactService {
    repo: Arc<dyn ContactRepo>,
    audit: AuditService,
}

impl ContactService {
    pub fn new(repo: Arc<dyn ContactRepo>, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn submit(
        &self,
        actor: &str,
        submission: ContactSubmission,
    ) -> Result<ContactMessageRecord, ContactError> {
        let record = ContactMessageRecord {
            id: Uuid::new_v4(),
            name: submission.name,
            email: submission.email,
            message: submission.message,
            received_at: OffsetDateTime::now_utc(),
        };

        self.repo.append_message(record.clone()).await?;

        info!(
            target = "quire::application::contact",
            message_id = %record.id,
            "Contact message stored"
        );
        self.audit
            .record(
                actor,
                "contact.create",
                "contact_message",
                Some(&record.id.to_string()),
                Some(&MessageSnapshot {
                    name: &record.name,
                    email: &record.email,
                    length: record.message.chars().count(),
                }),
            )
            .await?;

        Ok(record)
    }
}
