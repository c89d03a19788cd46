//! Rich-text editor widgets for the post form.
//!
//! The post form only ever sees a field name and the current HTML value;
//! whatever widget renders the body must keep the hidden `content` field
//! in sync so the submission carries the edited markup.

use std::sync::Arc;

use askama::Template;

use crate::config::{EditorKind, EditorSettings};
use crate::infra::error::InfraError;
use crate::presentation::views::{TemplateRenderError, render_fragment};

/// Field and value the editor is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBinding {
    pub field: &'static str,
    pub value: String,
}

pub trait ContentEditor: Send + Sync {
    fn render(&self, binding: &EditorBinding) -> Result<String, TemplateRenderError>;
}

/// Plain textarea; the browser submits it directly.
#[derive(Debug, Clone, Default)]
pub struct TextareaEditor;

#[derive(Template)]
#[template(path = "partials/editor/textarea.html")]
struct TextareaEditorTemplate<'a> {
    field: &'a str,
    value: &'a str,
}

impl ContentEditor for TextareaEditor {
    fn render(&self, binding: &EditorBinding) -> Result<String, TemplateRenderError> {
        render_fragment(
            "infra::editor::TextareaEditor",
            &TextareaEditorTemplate {
                field: binding.field,
                value: &binding.value,
            },
        )
    }
}

/// Third-party WYSIWYG widget loaded from its CDN with the configured key.
#[derive(Debug, Clone)]
pub struct HostedEditor {
    api_key: String,
}

#[derive(Template)]
#[template(path = "partials/editor/hosted.html")]
struct HostedEditorTemplate<'a> {
    field: &'a str,
    value: &'a str,
    script_src: String,
}

impl HostedEditor {
    pub fn new(api_key: impl Into<String>) -> Result<Self, InfraError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(InfraError::configuration(
                "editor.api_key must not be blank for the hosted editor",
            ));
        }
        Ok(Self { api_key })
    }

    fn script_src(&self) -> String {
        format!(
            "https://cdn.tiny.cloud/1/{}/tinymce/7/tinymce.min.js",
            url::form_urlencoded::byte_serialize(self.api_key.trim().as_bytes()).collect::<String>()
        )
    }
}

impl ContentEditor for HostedEditor {
    fn render(&self, binding: &EditorBinding) -> Result<String, TemplateRenderError> {
        render_fragment(
            "infra::editor::HostedEditor",
            &HostedEditorTemplate {
                field: binding.field,
                value: &binding.value,
                script_src: self.script_src(),
            },
        )
    }
}

/// Build the editor selected by configuration.
pub fn from_settings(settings: &EditorSettings) -> Result<Arc<dyn ContentEditor>, InfraError> {
    match settings.kind {
        EditorKind::Textarea => Ok(Arc::new(TextareaEditor)),
        EditorKind::Hosted => {
            let key = settings.api_key.as_deref().ok_or_else(|| {
                InfraError::configuration(
                    "editor.kind is `hosted` but no editor.api_key is configured (set QUIRE__EDITOR__API_KEY)",
                )
            })?;
            Ok(Arc::new(HostedEditor::new(key)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> EditorBinding {
        EditorBinding {
            field: "content",
            value: "<p>Hello & welcome</p>".to_string(),
        }
    }

    #[test]
    fn textarea_escapes_the_value() {
        let html = TextareaEditor.render(&binding()).expect("render");
        assert!(html.contains("name=\"content\""));
        assert!(html.contains("&lt;p&gt;Hello &amp; welcome&lt;/p&gt;"));
    }

    #[test]
    fn hosted_editor_mirrors_into_hidden_field() {
        let editor = HostedEditor::new("key-123").expect("editor");
        let html = editor.render(&binding()).expect("render");
        assert!(html.contains("type=\"hidden\""));
        assert!(html.contains("name=\"content\""));
        assert!(html.contains("/1/key-123/"));
    }

    #[test]
    fn hosted_editor_requires_a_key() {
        let settings = EditorSettings {
            kind: EditorKind::Hosted,
            api_key: None,
        };
        assert!(matches!(
            from_settings(&settings),
            Err(InfraError::Configuration { .. })
        ));
        assert!(HostedEditor::new("  ").is_err());
    }
}
