use serde::{Deserialize, Serialize};

use crate::application::validation::{FieldErrors, FormSchema, Validator, blank_to_none};

/// Public comment submission; the target post comes from the route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentForm {
    pub author_name: String,
    pub author_email: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub author_name: String,
    pub author_email: Option<String>,
    pub text: String,
}

impl FormSchema for CommentForm {
    type Output = CommentDraft;
    const INVALID_MESSAGE: &'static str = "Invalid comment. Please check the fields below.";

    fn parse(&self) -> Result<CommentDraft, FieldErrors> {
        let mut validator = Validator::new();
        validator
            .min_chars(
                "authorName",
                &self.author_name,
                2,
                "Name must be at least 2 characters.",
            )
            .optional_email("authorEmail", &self.author_email, "Invalid email address.")
            .min_chars("text", &self.text, 3, "Comment must be at least 3 characters.");

        validator.finish(CommentDraft {
            author_name: self.author_name.trim().to_string(),
            author_email: blank_to_none(&self.author_email),
            text: self.text.trim().to_string(),
        })
    }
}

/// Admin reply to a comment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplyForm {
    pub reply_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub reply_text: String,
}

impl FormSchema for ReplyForm {
    type Output = ReplyDraft;
    const INVALID_MESSAGE: &'static str = "Invalid reply.";

    fn parse(&self) -> Result<ReplyDraft, FieldErrors> {
        let mut validator = Validator::new();
        validator.min_chars("replyText", &self.reply_text, 1, "Reply cannot be empty.");
        validator.finish(ReplyDraft {
            reply_text: self.reply_text.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_optional() {
        let form = CommentForm {
            author_name: "Reader".into(),
            author_email: "   ".into(),
            text: "Great read!".into(),
        };
        let draft = form.parse().expect("valid");
        assert_eq!(draft.author_email, None);
    }

    #[test]
    fn malformed_email_and_short_text_are_both_reported() {
        let form = CommentForm {
            author_name: "Reader".into(),
            author_email: "reader@".into(),
            text: "ok".into(),
        };
        let errors = form.parse().expect_err("invalid");
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["authorEmail", "text"]
        );
    }

    #[test]
    fn whitespace_reply_is_empty() {
        let errors = ReplyForm {
            reply_text: " \n ".into(),
        }
        .parse()
        .expect_err("blank");
        assert_eq!(errors.first("replyText"), Some("Reply cannot be empty."));
    }
}
