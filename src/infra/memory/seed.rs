//! Demonstration content loaded when `site.seed_demo_content` is on.

use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use super::SeedData;
use crate::domain::entities::{
    CommentRecord, PostRecord, SiteSettingsRecord, SubscriberRecord, TeamMemberRecord,
};

const POST_IMAGE: &str = "https://placehold.co/600x400.png";
const PORTRAIT_IMAGE: &str = "https://placehold.co/300x300.png";

pub fn default_site_settings() -> SiteSettingsRecord {
    SiteSettingsRecord {
        site_name: "Quire".to_string(),
        site_description: "Discover engaging articles and stories. A modern blogging platform designed for creative inspiration and thoughtful discussions.".to_string(),
        footer_copyright_text: "Quire. All rights reserved.".to_string(),
        allow_new_user_registrations: false,
        enable_comments_globally: true,
        updated_at: datetime!(2024-07-01 00:00 UTC),
    }
}

struct PostSeed {
    slug: &'static str,
    title: &'static str,
    published_at: OffsetDateTime,
    author: &'static str,
    image_hint: &'static str,
    excerpt: &'static str,
    content_html: &'static str,
    category: &'static str,
    tags: [&'static str; 3],
}

const POSTS: [PostSeed; 5] = [
    PostSeed {
        slug: "first-post-journey-begins",
        title: "My First Post: A Journey Begins",
        published_at: datetime!(2024-07-28 00:00 UTC),
        author: "Jane Doe",
        image_hint: "journey path",
        excerpt: "This is the beginning of a beautiful journey into the world of blogging. Exploring new ideas and sharing thoughts.",
        content_html: "<p>This is the full content of the first blog post. It supports <strong>rich text formatting</strong>, including headings, lists, and more.</p><h2>A New Chapter</h2><p>Embarking on this blogging adventure opens up a new chapter of creativity and expression.</p><ul><li>Explore new topics</li><li>Share insights</li><li>Connect with readers</li></ul>",
        category: "Personal Growth",
        tags: ["new beginnings", "blogging", "creativity"],
    },
    PostSeed {
        slug: "mastering-modern-design",
        title: "Mastering Modern Design Principles",
        published_at: datetime!(2024-07-25 00:00 UTC),
        author: "John Art",
        image_hint: "design tools",
        excerpt: "Dive into the core principles of modern design, from minimalism to user experience.",
        content_html: "<p>Modern design is constantly evolving. This post explores key principles that stand the test of time.</p><h3>Color Theory</h3><p>Understanding how colors interact is crucial for impactful design.</p>",
        category: "Design",
        tags: ["ui/ux", "minimalism", "web design"],
    },
    PostSeed {
        slug: "the-art-of-storytelling",
        title: "The Art of Storytelling in the Digital Age",
        published_at: datetime!(2024-07-22 00:00 UTC),
        author: "Alice Writer",
        image_hint: "open book",
        excerpt: "Learn how to captivate your audience with compelling narratives in the digital landscape.",
        content_html: "<p>Storytelling is a powerful tool. In the digital age, it takes many forms, from blog posts to social media content.</p>",
        category: "Writing",
        tags: ["content creation", "narrative", "digital media"],
    },
    PostSeed {
        slug: "tech-innovations-2024",
        title: "Top Tech Innovations to Watch in 2024",
        published_at: datetime!(2024-07-20 00:00 UTC),
        author: "Tech Savvy",
        image_hint: "futuristic tech",
        excerpt: "A look at the groundbreaking technologies shaping our future this year.",
        content_html: "<p>From AI advancements to sustainable tech, 2024 is a year of exciting innovations. We cover the most impactful ones here.</p>",
        category: "Technology",
        tags: ["ai", "innovation", "future tech"],
    },
    PostSeed {
        slug: "healthy-mind-healthy-life",
        title: "Cultivating a Healthy Mind for a Healthy Life",
        published_at: datetime!(2024-07-18 00:00 UTC),
        author: "Dr. Wellness",
        image_hint: "serene meditation",
        excerpt: "Explore practical tips for mental well-being and building resilience in everyday life.",
        content_html: "<p>Mental health is as important as physical health. This article discusses various techniques like mindfulness, stress management, and seeking support.</p>",
        category: "Personal Growth",
        tags: ["mental health", "mindfulness", "well-being"],
    },
];

/// (post slug, author, text, reply, posted)
const COMMENTS: [(&str, &str, &str, Option<&str>, OffsetDateTime); 3] = [
    (
        "first-post-journey-begins",
        "Sam Reader",
        "Congratulations on the launch! Looking forward to the next posts.",
        Some("Thank you, Sam! More is on the way."),
        datetime!(2024-07-28 15:20 UTC),
    ),
    (
        "mastering-modern-design",
        "Priya Patel",
        "The section on color theory was exactly what I needed this week.",
        None,
        datetime!(2024-07-26 08:45 UTC),
    ),
    (
        "first-post-journey-begins",
        "Leo Martins",
        "Great start. Will you be covering writing routines too?",
        None,
        datetime!(2024-07-29 11:05 UTC),
    ),
];

const TEAM: [(&str, &str, &str, &str); 3] = [
    (
        "Eleanor Vance",
        "Chief Editor & Visionary",
        "professional woman",
        "Eleanor drives the creative direction of the blog, ensuring every piece inspires and enlightens.",
    ),
    (
        "Marcus Chen",
        "Lead Technology Architect",
        "man coding",
        "Marcus is the brain behind the sleek design and seamless reading experience.",
    ),
    (
        "Sophia Lorenzi",
        "Head of Community Engagement",
        "woman smiling",
        "Sophia fosters a vibrant community, connecting readers and writers alike.",
    ),
];

const SUBSCRIBERS: [(&str, OffsetDateTime); 3] = [
    ("subscriber1@example.com", datetime!(2024-07-01 10:00 UTC)),
    ("another.fan@example.com", datetime!(2024-07-05 14:30 UTC)),
    ("avidreader@example.net", datetime!(2024-07-10 09:15 UTC)),
];

pub fn demo_content() -> SeedData {
    let posts: Vec<PostRecord> = POSTS
        .iter()
        .map(|seed| PostRecord {
            id: Uuid::new_v4(),
            slug: seed.slug.to_string(),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            excerpt: seed.excerpt.to_string(),
            content_html: seed.content_html.to_string(),
            category: Some(seed.category.to_string()),
            tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            image_url: Some(POST_IMAGE.to_string()),
            image_hint: Some(seed.image_hint.to_string()),
            published_at: seed.published_at,
            updated_at: seed.published_at,
        })
        .collect();

    let comments = COMMENTS
        .iter()
        .filter_map(|(slug, author, text, reply, posted)| {
            let post = posts.iter().find(|post| post.slug == *slug)?;
            Some(CommentRecord {
                id: Uuid::new_v4(),
                post_id: post.id,
                post_slug: post.slug.clone(),
                author_name: author.to_string(),
                author_email: None,
                avatar_url: None,
                text: text.to_string(),
                reply_text: reply.map(str::to_string),
                is_approved: true,
                created_at: *posted,
            })
        })
        .collect();

    let team = TEAM
        .iter()
        .map(|(name, role, hint, bio)| TeamMemberRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: role.to_string(),
            bio: bio.to_string(),
            image_url: Some(PORTRAIT_IMAGE.to_string()),
            image_hint: Some(hint.to_string()),
        })
        .collect();

    let subscribers = SUBSCRIBERS
        .iter()
        .map(|(email, subscribed_at)| SubscriberRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            subscribed_at: *subscribed_at,
        })
        .collect();

    SeedData {
        posts,
        comments,
        subscribers,
        team,
        settings: default_site_settings(),
    }
}
