//! Domain entities held by the repositories.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub excerpt: String,
    pub content_html: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
    pub published_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub post_slug: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub avatar_url: Option<String>,
    pub text: String,
    pub reply_text: Option<String>,
    pub is_approved: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriberRecord {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMemberRecord {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub image_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettingsRecord {
    pub site_name: String,
    pub site_description: String,
    pub footer_copyright_text: String,
    pub allow_new_user_registrations: bool,
    pub enable_comments_globally: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactMessageRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub received_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload_text: Option<String>,
    pub created_at: OffsetDateTime,
}
