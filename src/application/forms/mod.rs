//! Raw form payloads and the schemas that turn them into typed values.
//!
//! Every field arrives as a string (missing fields deserialize as empty),
//! so the same structs back both urlencoded submissions and datastar
//! signal payloads.

pub mod comment;
pub mod confirm;
pub mod contact;
pub mod image;
pub mod newsletter;
pub mod post;
pub mod settings;

pub use comment::{CommentDraft, CommentForm, ReplyDraft, ReplyForm};
pub use confirm::ConfirmForm;
pub use contact::{ContactForm, ContactSubmission};
pub use image::{FeaturedImage, ImageSource};
pub use newsletter::{NewsletterForm, NewsletterSignup};
pub use post::{PostDraft, PostForm};
pub use settings::{SettingsDraft, SettingsForm};
