use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    application::{
        error::HttpError,
        forms::SettingsForm,
        mutation::{MutationFailure, MutationSuccess},
    },
    domain::entities::SiteSettingsRecord,
    infra::http::{
        ADMIN_ACTOR,
        relay::{Patch, is_datastar, json_result, stream_outcome},
    },
    presentation::{
        admin::views as admin_views,
        forms::{FormState, SETTINGS_FORM_SELECTOR, SettingsFormTemplate},
        views::{TemplateRenderError, format_display_date, render_fragment, render_template_response},
    },
};

use super::{AdminState, shared::unavailable};

pub(super) async fn admin_settings(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Settings", "/admin/settings").await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let settings = match state.settings.load().await {
        Ok(settings) => settings,
        Err(err) => return unavailable("infra::http::admin::settings", &err).into_response(),
    };

    let form_html = match render_settings_form(FormState::with_values(form_from_settings(&settings))) {
        Ok(html) => html,
        Err(err) => return HttpError::from(err).into_response(),
    };

    let content = admin_views::AdminSettingsView {
        updated_at: format_display_date(settings.updated_at),
        form_html,
    };
    let view = admin_views::AdminLayout::new(chrome, content);
    render_template_response(admin_views::AdminSettingsTemplate { view }, StatusCode::OK)
}

pub(super) async fn admin_settings_update(
    State(state): State<AdminState>,
    headers: HeaderMap,
    Form(form): Form<SettingsForm>,
) -> Response {
    let service = state.settings.clone();
    let mut saved = None;
    let slot = &mut saved;
    let outcome = state
        .mutations
        .run("settings.update", &form, move |draft| async move {
            match service.update(ADMIN_ACTOR, draft).await {
                Ok(record) => {
                    *slot = Some(record);
                    Ok(MutationSuccess::new("Settings saved successfully."))
                }
                Err(err) => Err(MutationFailure::from(err)),
            }
        })
        .await;

    if !is_datastar(&headers) {
        return json_result(outcome);
    }

    let form_state = match &saved {
        Some(record) => FormState::with_values(form_from_settings(record)),
        None => FormState::after(&outcome, form),
    };
    match render_settings_form(form_state) {
        Ok(html) => stream_outcome(outcome, vec![Patch::new(SETTINGS_FORM_SELECTOR, html)]),
        Err(err) => HttpError::from(err).into_response(),
    }
}

fn form_from_settings(settings: &SiteSettingsRecord) -> SettingsForm {
    let flag = |enabled: bool| enabled.then(|| "on".to_string());
    SettingsForm {
        site_name: settings.site_name.clone(),
        site_description: settings.site_description.clone(),
        footer_copyright_text: settings.footer_copyright_text.clone(),
        allow_new_user_registrations: flag(settings.allow_new_user_registrations),
        enable_comments_globally: flag(settings.enable_comments_globally),
    }
}

fn render_settings_form(form: FormState<SettingsForm>) -> Result<String, TemplateRenderError> {
    render_fragment(
        "infra::http::admin::render_settings_form",
        &SettingsFormTemplate { form },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::validation::parse_checkbox_flag;
    use time::macros::datetime;

    #[test]
    fn stored_flags_become_checked_boxes() {
        let settings = SiteSettingsRecord {
            site_name: "Quire".into(),
            site_description: "Notes and essays.".into(),
            footer_copyright_text: "Quire.".into(),
            allow_new_user_registrations: false,
            enable_comments_globally: true,
            updated_at: datetime!(2024-07-28 00:00 UTC),
        };
        let form = form_from_settings(&settings);
        assert!(!parse_checkbox_flag(&form.allow_new_user_registrations));
        assert!(parse_checkbox_flag(&form.enable_comments_globally));
    }
}
