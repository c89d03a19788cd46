//! Featured-image source resolution.
//!
//! A post form carries up to three candidate sources: a data URI produced
//! from an uploaded file, a pasted URL and (when editing) the image already
//! stored. The form's `imageSource` field names the source the author
//! touched last; without it the upload wins over the URL, which wins over
//! keeping what is stored.

use base64::{Engine as _, engine::general_purpose::STANDARD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Upload,
    Url,
    Existing,
}

impl ImageSource {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "upload" => Some(Self::Upload),
            "url" => Some(Self::Url),
            "existing" => Some(Self::Existing),
            _ => None,
        }
    }
}

/// What the write should do with the stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeaturedImage {
    Keep,
    Replace(String),
    Clear,
}

impl FeaturedImage {
    /// Apply to the currently stored image (`None` when creating).
    pub fn apply(self, current: Option<String>) -> Option<String> {
        match self {
            Self::Keep => current,
            Self::Replace(value) => Some(value),
            Self::Clear => None,
        }
    }
}

/// Pick the effective source. Inputs are expected to be validated already.
pub fn resolve_featured_image(
    source: Option<ImageSource>,
    data_uri: &str,
    url: &str,
) -> FeaturedImage {
    let data_uri = data_uri.trim();
    let url = url.trim();

    match source {
        Some(ImageSource::Upload) if !data_uri.is_empty() => {
            FeaturedImage::Replace(data_uri.to_string())
        }
        Some(ImageSource::Upload) | Some(ImageSource::Existing) => FeaturedImage::Keep,
        Some(ImageSource::Url) if url.is_empty() => FeaturedImage::Clear,
        Some(ImageSource::Url) => FeaturedImage::Replace(url.to_string()),
        None if !data_uri.is_empty() => FeaturedImage::Replace(data_uri.to_string()),
        None if !url.is_empty() => FeaturedImage::Replace(url.to_string()),
        None => FeaturedImage::Keep,
    }
}

/// True for `data:image/<subtype>;base64,<payload>` where the payload
/// decodes as standard base64.
pub fn is_valid_image_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return false;
    };
    let Some((subtype, payload)) = rest.split_once(";base64,") else {
        return false;
    };

    let subtype_ok = !subtype.is_empty()
        && subtype
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'));

    subtype_ok
        && !payload.is_empty()
        && STANDARD
            .decode(payload.trim())
            .is_ok_and(|bytes| !bytes.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn explicit_source_wins() {
        assert_eq!(
            resolve_featured_image(Some(ImageSource::Url), PIXEL, "https://example.com/a.png"),
            FeaturedImage::Replace("https://example.com/a.png".into())
        );
        assert_eq!(
            resolve_featured_image(Some(ImageSource::Upload), PIXEL, "https://example.com/a.png"),
            FeaturedImage::Replace(PIXEL.into())
        );
        assert_eq!(
            resolve_featured_image(Some(ImageSource::Existing), PIXEL, ""),
            FeaturedImage::Keep
        );
    }

    #[test]
    fn blank_url_source_clears_the_image() {
        assert_eq!(
            resolve_featured_image(Some(ImageSource::Url), "", " "),
            FeaturedImage::Clear
        );
        assert_eq!(
            FeaturedImage::Clear.apply(Some("https://example.com/old.png".into())),
            None
        );
    }

    #[test]
    fn fallback_order_is_upload_then_url_then_existing() {
        assert_eq!(
            resolve_featured_image(None, PIXEL, "https://example.com/a.png"),
            FeaturedImage::Replace(PIXEL.into())
        );
        assert_eq!(
            resolve_featured_image(None, "", "https://example.com/a.png"),
            FeaturedImage::Replace("https://example.com/a.png".into())
        );
        let kept = resolve_featured_image(None, "", "");
        assert_eq!(
            kept.apply(Some("https://example.com/old.png".into())),
            Some("https://example.com/old.png".into())
        );
    }

    #[test]
    fn data_uri_shape() {
        assert!(is_valid_image_data_uri(PIXEL));
        assert!(is_valid_image_data_uri("data:image/svg+xml;base64,PHN2Zy8+"));
        assert!(!is_valid_image_data_uri("data:text/plain;base64,aGVsbG8="));
        assert!(!is_valid_image_data_uri("data:image/png;base64,***"));
        assert!(!is_valid_image_data_uri("data:image/png,raw"));
        assert!(!is_valid_image_data_uri("https://example.com/a.png"));
    }
}
