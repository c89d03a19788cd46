mod support;

use axum::http::StatusCode;

use support::{demo_app, json_response, post_form};

const CONTACT: &str =
    "name=Ada&email=ada%40example.com&message=A+question+about+analytical+engines.";

const NEWSLETTER: &str = "email=reader%40example.com";

const COMMENT: &str = "authorName=Grace&authorEmail=&text=What+a+lovely+first+post.";

const POST: &str = "title=Hello+World&slug=hello-world&author=Jane+Doe\
&category=Design&tags=intro%2C+welcome&excerpt=A+first+post+to+say+hello.\
&imageSource=url&imageUrl=https%3A%2F%2Fplacehold.co%2F600x400.png\
&content=%3Cp%3EThis+is+the+very+first+post.%3C%2Fp%3E";

const SETTINGS: &str = "siteName=Quire+Daily&siteDescription=Stories+about+building+things.\
&footerCopyrightText=All+rights+reserved.&enableCommentsGlobally=on";

/// `body` with the value of `field` emptied.
fn blank(body: &str, field: &str) -> String {
    let prefix = format!("{field}=");
    body.split('&')
        .map(|pair| {
            if pair.starts_with(&prefix) {
                prefix.clone()
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[tokio::test]
async fn each_empty_required_field_is_reported_alone() {
    let cases = [
        ("/contact", CONTACT, "name"),
        ("/contact", CONTACT, "email"),
        ("/contact", CONTACT, "message"),
        ("/newsletter", NEWSLETTER, "email"),
        ("/blogs/first-post-journey-begins/comments", COMMENT, "authorName"),
        ("/blogs/first-post-journey-begins/comments", COMMENT, "text"),
        ("/admin/posts/new", POST, "title"),
        ("/admin/posts/new", POST, "slug"),
        ("/admin/posts/new", POST, "author"),
        ("/admin/posts/new", POST, "excerpt"),
        ("/admin/posts/new", POST, "content"),
        ("/admin/settings", SETTINGS, "siteName"),
        ("/admin/settings", SETTINGS, "siteDescription"),
    ];

    for (uri, valid, field) in cases {
        let app = demo_app();
        let body = blank(valid, field);
        let (status, json) = json_response(post_form(&app, uri, &body).await).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri} without {field}");
        assert_eq!(json["isError"], true, "{uri} without {field}");
        let fields: Vec<&str> = json["errors"]
            .as_object()
            .map(|errors| errors.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(fields, vec![field], "{uri} without {field}");
    }
}

#[tokio::test]
async fn complete_forms_are_accepted() {
    for (uri, valid) in [
        ("/contact", CONTACT),
        ("/newsletter", NEWSLETTER),
        ("/blogs/first-post-journey-begins/comments", COMMENT),
        ("/admin/posts/new", POST),
        ("/admin/settings", SETTINGS),
    ] {
        let app = demo_app();
        let (status, json) = json_response(post_form(&app, uri, valid).await).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["isError"], false, "{uri}");
    }
}
