use askama::Template;
use quire::presentation::admin::views::*;

fn sample_post_row() -> AdminPostRowView {
    AdminPostRowView {
        slug: "hello-world".into(),
        title: "Hello World".into(),
        author: "Jane Doe".into(),
        category: None,
        published: "July 28, 2024".into(),
        public_href: "/blogs/hello-world".into(),
        edit_href: "/admin/posts/hello-world/edit".into(),
        delete_action: "/admin/posts/hello-world/delete".into(),
    }
}

#[test]
fn posts_panel_wraps_rows_in_the_patch_target() {
    let html = AdminPostsPanelTemplate {
        content: AdminPostListView {
            rows: vec![sample_post_row()],
        },
    }
    .render()
    .expect("render");

    assert!(html.trim_start().starts_with("<div id=\"admin-panel\""));
    assert!(html.contains("action=\"/admin/posts/hello-world/delete\""));
    assert!(html.contains("name=\"confirm\" value=\"yes\""));
    assert!(html.contains("confirm("));
}

#[test]
fn empty_subscriber_panel_says_so() {
    let html = AdminSubscribersPanelTemplate {
        content: AdminSubscriberListView { rows: Vec::new() },
    }
    .render()
    .expect("render");

    assert!(html.contains("No subscribers yet."));
}

#[test]
fn comment_rows_embed_their_reply_form() {
    let html = AdminCommentsPanelTemplate {
        content: AdminCommentListView {
            rows: vec![AdminCommentRowView {
                id: "c1".into(),
                author_name: "Grace".into(),
                author_email: None,
                text: "Lovely post.".into(),
                post_slug: "hello-world".into(),
                post_href: "/blogs/hello-world".into(),
                posted: "July 28, 2024".into(),
                reply_text: None,
                reply_form: "<form id=\"reply-form-c1\"></form>".into(),
                delete_action: "/admin/comments/c1/delete".into(),
            }],
        },
    }
    .render()
    .expect("render");

    assert!(html.contains("<form id=\"reply-form-c1\"></form>"));
    assert!(html.contains("Lovely post."));
}

#[test]
fn navigation_marks_the_current_section() {
    let chrome = AdminChrome::new("Quire".into(), "Comments", "/admin/comments");
    let html = AdminTransferAccessTemplate {
        view: AdminLayout::new(
            chrome,
            AdminTransferAccessView {
                heading: "Transfer Admin Access".into(),
                body: "Not available yet.".into(),
            },
        ),
    }
    .render()
    .expect("render");

    assert!(html.contains("href=\"/admin/comments\" class=\"is-active\""));
}
