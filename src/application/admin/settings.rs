use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::admin::audit::AuditService;
use crate::application::forms::SettingsDraft;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::SiteSettingsRecord;

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<AdminSettingsError> for MutationFailure {
    fn from(_: AdminSettingsError) -> Self {
        MutationFailure::failed("Settings could not be saved. Please try again later.")
    }
}

#[derive(Clone)]
pub struct AdminSettingsService {
    repo: Arc<dyn SettingsRepo>,
    audit: AuditService,
}

impl AdminSettingsService {
    pub fn new(repo: Arc<dyn SettingsRepo>, audit: AuditService) -> Self {
        Self { repo, audit }
    }

    pub async fn load(&self) -> Result<SiteSettingsRecord, AdminSettingsError> {
        self.repo
            .load_site_settings()
            .await
            .map_err(AdminSettingsError::from)
    }

    pub async fn update(
        &self,
        actor: &str,
        draft: SettingsDraft,
    ) -> Result<SiteSettingsRecord, AdminSettingsError> {
        let record = SiteSettingsRecord {
            site_name: draft.site_name,
            site_description: draft.site_description,
            footer_copyright_text: draft.footer_copyright_text,
            allow_new_user_registrations: draft.allow_new_user_registrations,
            enable_comments_globally: draft.enable_comments_globally,
            updated_at: OffsetDateTime::now_utc(),
        };

        self.repo.upsert_site_settings(record).await?;
        let latest = self.repo.load_site_settings().await?;

        info!(
            target = "quire::application::admin::settings",
            site_name = %latest.site_name,
            comments_enabled = latest.enable_comments_globally,
            "Site settings updated"
        );
        self.audit
            .record(
                actor,
                "settings.update",
                "settings",
                None,
                Some(&SettingsSnapshot::from(&latest)),
            )
            .await?;

        Ok(latest)
    }
}

#[derive(Debug, Serialize)]
struct SettingsSnapshot<'a> {
    site_name: &'a str,
    site_description: &'a str,
    footer_copyright_text: &'a str,
    allow_new_user_registrations: bool,
    enable_comments_globally: bool,
}

impl<'a> From<&'a SiteSettingsRecord> for SettingsSnapshot<'a> {
    fn from(record: &'a SiteSettingsRecord) -> Self {
        Self {
            site_name: record.site_name.as_str(),
            site_description: record.site_description.as_str(),
            footer_copyright_text: record.footer_copyright_text.as_str(),
            allow_new_user_registrations: record.allow_new_user_registrations,
            enable_comments_globally: record.enable_comments_globally,
        }
    }
}
