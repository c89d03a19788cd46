mod support;

use axum::http::StatusCode;

use support::{body_text, demo_app, get};

#[tokio::test]
async fn home_lists_recent_posts_and_team() {
    let app = demo_app();
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Welcome to Quire"));
    assert!(page.contains("id=\"newsletter-form\""));
    assert!(page.contains("id=\"toast-stack\""));
}

#[tokio::test]
async fn blog_listing_filters_and_searches() {
    let app = demo_app();
    assert_eq!(get(&app, "/blogs").await.status(), StatusCode::OK);

    let page = body_text(get(&app, "/blogs?q=zzzz-no-match").await).await;
    assert!(page.contains("No posts match your filters."));
}

#[tokio::test]
async fn unknown_pages_use_the_not_found_template() {
    let app = demo_app();
    let response = get(&app, "/no/such/page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page Not Found"));

    assert_eq!(
        get(&app, "/blogs/no-such-post").await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn post_page_carries_share_links_and_comment_form() {
    let app = demo_app();
    let page = body_text(get(&app, "/blogs/first-post-journey-begins").await).await;
    assert!(page.contains("id=\"comment-form\""));
    assert!(page.contains("id=\"post-comments\""));
    assert!(page.contains("https://www.linkedin.com/shareArticle"));
    assert!(page.contains("mailto:?subject="));
}

#[tokio::test]
async fn about_and_contact_render() {
    let app = demo_app();
    assert_eq!(get(&app, "/about").await.status(), StatusCode::OK);
    let page = body_text(get(&app, "/contact").await).await;
    assert!(page.contains("id=\"contact-form\""));
}
