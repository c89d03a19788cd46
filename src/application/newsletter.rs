//! Public newsletter sign-up.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::admin::audit::AuditService;
use crate::application::forms::NewsletterSignup;
use crate::application::mutation::{MutationFailure, MutationSuccess};
use crate::application::repos::{RepoError, SUBSCRIBERS_EMAIL_CONSTRAINT, SubscribersRepo};
use crate::domain::entities::SubscriberRecord;

pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Failed to subscribe. Please try again later.";

#[derive(Debug, Error)]
pub enum NewsletterError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<NewsletterError> for MutationFailure {
    fn from(_: NewsletterError) -> Self {
        MutationFailure::failed(SUBSCRIBE_FAILED_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed(SubscriberRecord),
    AlreadySubscribed(SubscriberRecord),
}

impl SubscribeOutcome {
    pub fn into_success(self) -> MutationSuccess {
        match self {
            Self::Subscribed(subscriber) => {
                MutationSuccess::new(format!("Thank you for subscribing, {}!", subscriber.email))
            }
            Self::AlreadySubscribed(subscriber) => MutationSuccess::new(format!(
                "{} is already subscribed. Thank you for reading!",
                subscriber.email
            )),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubscriberSnapshot<'a> {
    email: &'a str,
}

#[derive(Clone)]
pub struct NewsletterService {
    repo: Arc<dyn SubscribersRepo>,
    audit: AuditService,
}

impl NewsletterService {
    pub fn new(repo: Arc<dyn SubscribersRepo>, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    /// Subscribe `signup.email`; subscribing twice is not an error.
    pub async fn subscribe(
        &self,
        actor: &str,
        signup: NewsletterSignup,
    ) -> Result<SubscribeOutcome, NewsletterError> {
        if let Some(existing) = self.repo.find_by_email(&signup.email).await? {
            return Ok(SubscribeOutcome::AlreadySubscribed(existing));
        }

        let subscriber = match self.repo.create_subscriber(&signup.email).await {
            Ok(subscriber) => subscriber,
            // Lost a race with a concurrent sign-up for the same address.
            Err(RepoError::Duplicate { constraint })
                if constraint == SUBSCRIBERS_EMAIL_CONSTRAINT =>
            {
                return match self.repo.find_by_email(&signup.email).await? {
                    Some(existing) => Ok(SubscribeOutcome::AlreadySubscribed(existing)),
                    None => Err(RepoError::NotFound.into()),
                };
            }
            Err(err) => {
                warn!(
                    target = "quire::application::newsletter",
                    error = %err,
                    "Subscriber store rejected sign-up"
                );
                return Err(err.into());
            }
        };

        info!(
            target = "quire::application::newsletter",
            subscriber_id = %subscriber.id,
            "New subscriber"
        );
        self.audit
            .record(
                actor,
                "subscriber.create",
                "subscriber",
                Some(&subscriber.id.to_string()),
                Some(&SubscriberSnapshot {
                    email: &subscriber.email,
                }),
            )
            .await?;

        Ok(SubscribeOutcome::Subscribed(subscriber))
    }
}
