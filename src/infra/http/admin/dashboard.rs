use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    application::admin::dashboard::DashboardOverview,
    presentation::{
        admin::views as admin_views,
        views::{format_display_date, format_iso_date, render_template_response},
    },
};

use super::{AdminState, shared::unavailable};

pub(super) async fn admin_root() -> Redirect {
    Redirect::to("/admin/dashboard")
}

pub(super) async fn admin_dashboard(State(state): State<AdminState>) -> Response {
    let chrome = match state.chrome.admin("Dashboard", "/admin/dashboard").await {
        Ok(chrome) => chrome,
        Err(err) => return err.into_response(),
    };

    let overview = match state.dashboard.overview().await {
        Ok(overview) => overview,
        Err(err) => {
            return unavailable("infra::http::admin::dashboard", &err).into_response();
        }
    };

    let view = admin_views::AdminLayout::new(chrome, build_dashboard_view(overview));
    render_template_response(admin_views::AdminDashboardTemplate { view }, StatusCode::OK)
}

fn build_dashboard_view(overview: DashboardOverview) -> admin_views::AdminDashboardView {
    let metrics = vec![
        admin_views::AdminMetricView {
            label: "Posts",
            value: overview.post_count as u64,
            href: "/admin/posts",
        },
        admin_views::AdminMetricView {
            label: "Subscribers",
            value: overview.subscriber_count as u64,
            href: "/admin/subscribers",
        },
        admin_views::AdminMetricView {
            label: "Comments",
            value: overview.comment_count as u64,
            href: "/admin/comments",
        },
        admin_views::AdminMetricView {
            label: "Categories",
            value: overview.category_count as u64,
            href: "/admin/categories",
        },
        admin_views::AdminMetricView {
            label: "Messages",
            value: overview.message_count,
            href: "/admin/dashboard",
        },
    ];

    let recent_posts = overview
        .recent_posts
        .iter()
        .map(|post| admin_views::AdminRecentPostView {
            title: post.title.clone(),
            published: format_display_date(post.published_at),
            edit_href: format!("/admin/posts/{}/edit", post.slug),
        })
        .collect();

    let activity = overview
        .recent_activity
        .iter()
        .map(|entry| admin_views::AdminActivityView {
            action: entry.action.clone(),
            entity_type: entry.entity_type.clone(),
            actor: entry.actor.clone(),
            when: format_display_date(entry.created_at),
            iso_date: format_iso_date(entry.created_at),
        })
        .collect();

    admin_views::AdminDashboardView {
        metrics,
        recent_posts,
        activity,
    }
}
