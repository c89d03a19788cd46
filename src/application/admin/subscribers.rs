use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::admin::audit::AuditService;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{RepoError, SubscribersRepo};
use crate::domain::entities::SubscriberRecord;
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum AdminSubscriberError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for AdminSubscriberError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::Domain(DomainError::not_found("subscriber")),
            other => Self::Repo(other),
        }
    }
}

impl From<AdminSubscriberError> for MutationFailure {
    fn from(err: AdminSubscriberError) -> Self {
        match err {
            AdminSubscriberError::Domain(DomainError::NotFound { .. }) => {
                MutationFailure::not_found("Subscriber not found.")
            }
            AdminSubscriberError::Domain(DomainError::Validation { message }) => {
                MutationFailure::failed(message)
            }
            AdminSubscriberError::Repo(_) => MutationFailure::failed(
                "The subscriber could not be removed. Please try again later.",
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubscriberSnapshot<'a> {
    email: &'a str,
}

#[derive(Clone)]
pub struct AdminSubscriberService {
    repo: Arc<dyn SubscribersRepo>,
    audit: AuditService,
}

impl AdminSubscriberService {
    pub fn new(repo: Arc<dyn SubscribersRepo>, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn list_subscribers(&self) -> Result<Vec<SubscriberRecord>, AdminSubscriberError> {
        Ok(self.repo.list_subscribers().await?)
    }

    pub async fn remove(
        &self,
        actor: &str,
        id: Uuid,
    ) -> Result<SubscriberRecord, AdminSubscriberError> {
        let subscriber = self.repo.delete_subscriber(id).await?;

        info!(
            target = "quire::application::admin::subscribers",
            subscriber_id = %subscriber.id,
            "Subscriber removed"
        );
        self.audit
            .record(
                actor,
                "subscriber.delete",
                "subscriber",
                Some(&subscriber.id.to_string()),
                Some(&SubscriberSnapshot {
                    email: &subscriber.email,
                }),
            )
            .await?;

        Ok(subscriber)
    }
}
