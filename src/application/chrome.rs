use std::sync::Arc;

use axum::http::StatusCode;

use crate::application::error::HttpError;
use crate::application::repos::{RepoError, SettingsRepo};
use crate::presentation::admin::views::AdminChrome;
use crate::presentation::views::{BrandView, FooterView, LayoutChrome, NavigationView, PageMetaView};

const SOURCE: &str = "application::chrome::ChromeService";

/// Builds the page chrome (brand, navigation, footer) from stored settings.
#[derive(Clone)]
pub struct ChromeService {
    settings: Arc<dyn SettingsRepo>,
}

impl ChromeService {
    pub fn new(settings: Arc<dyn SettingsRepo>) -> Self {
        Self { settings }
    }

    pub async fn load(&self) -> Result<LayoutChrome, HttpError> {
        let settings = self
            .settings
            .load_site_settings()
            .await
            .map_err(|err| repo_failure("load_site_settings", err))?;

        Ok(LayoutChrome {
            brand: BrandView {
                title: settings.site_name.clone(),
                href: "/".to_string(),
            },
            navigation: NavigationView::public(),
            footer: FooterView {
                copy: settings.footer_copyright_text,
                description: settings.site_description.clone(),
            },
            meta: PageMetaView {
                title: settings.site_name,
                description: settings.site_description,
            },
        })
    }

    pub async fn admin(&self, page_title: &str, active_href: &str) -> Result<AdminChrome, HttpError> {
        let settings = self
            .settings
            .load_site_settings()
            .await
            .map_err(|err| repo_failure("load_site_settings", err))?;

        Ok(AdminChrome::new(settings.site_name, page_title, active_href))
    }
}

fn repo_failure(operation: &'static str, err: RepoError) -> HttpError {
    HttpError::new(
        SOURCE,
        StatusCode::SERVICE_UNAVAILABLE,
        "Failed to load site chrome",
        format!("{operation} failed: {err}"),
    )
}
