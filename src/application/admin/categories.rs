//! Categories are not stored on their own: they are the distinct category
//! names carried by posts.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::application::admin::audit::AuditService;
use crate::application::mutation::MutationFailure;
use crate::application::repos::{PostsRepo, PostsWriteRepo, RepoError};
use crate::domain::error::DomainError;
use crate::domain::posts::category_key;

#[derive(Debug, Error)]
pub enum AdminCategoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<AdminCategoryError> for MutationFailure {
    fn from(err: AdminCategoryError) -> Self {
        match err {
            AdminCategoryError::Domain(DomainError::NotFound { .. }) => {
                MutationFailure::not_found("Category not found.")
            }
            AdminCategoryError::Domain(DomainError::Validation { message }) => {
                MutationFailure::failed(message)
            }
            AdminCategoryError::Repo(_) => MutationFailure::failed(
                "The category could not be deleted. Please try again later.",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub key: String,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub name: String,
    pub posts_updated: u64,
}

#[derive(Debug, Serialize)]
struct CategorySnapshot<'a> {
    name: &'a str,
    posts_updated: u64,
}

#[derive(Clone)]
pub struct AdminCategoryService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    audit: AuditService,
}

impl AdminCategoryService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        audit: AuditService,
    ) -> Self {
        Self {
            reader,
            writer,
            audit,
        }
    }

    /// Distinct categories ordered by name, with the number of posts in each.
    pub async fn list_categories(&self) -> Result<Vec<CategorySummary>, AdminCategoryError> {
        let posts = self.reader.list_posts().await?;
        Ok(summarize_categories(
            posts.iter().filter_map(|post| post.category.as_deref()),
        ))
    }

    /// Unassign the category identified by `key` from every post. Posts are
    /// kept.
    pub async fn delete_category(
        &self,
        actor: &str,
        key: &str,
    ) -> Result<CategoryRemoval, AdminCategoryError> {
        let name = self
            .list_categories()
            .await?
            .into_iter()
            .find(|summary| summary.key == key)
            .map(|summary| summary.name)
            .ok_or_else(|| DomainError::not_found("category"))?;

        let posts_updated = self.writer.clear_category(&name).await?;

        info!(
            target = "quire::application::admin::categories",
            category = %name,
            posts_updated,
            "Category removed from posts"
        );

        let snapshot = CategorySnapshot {
            name: &name,
            posts_updated,
        };
        self.audit
            .record(actor, "category.delete", "category", Some(key), Some(&snapshot))
            .await?;

        Ok(CategoryRemoval {
            name,
            posts_updated,
        })
    }
}

/// Group category names, keeping the first spelling seen for each key.
pub fn summarize_categories<'a>(names: impl Iterator<Item = &'a str>) -> Vec<CategorySummary> {
    let mut grouped: BTreeMap<String, CategorySummary> = BTreeMap::new();
    for name in names {
        let key = category_key(name);
        grouped
            .entry(key.clone())
            .and_modify(|summary| summary.post_count += 1)
            .or_insert_with(|| CategorySummary {
                name: name.to_string(),
                key,
                post_count: 1,
            });
    }

    let mut categories: Vec<CategorySummary> = grouped.into_values().collect();
    categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_group_by_key_and_count() {
        let categories = summarize_categories(
            ["Design", "Personal Growth", "design", "Writing", "Personal Growth"].into_iter(),
        );
        assert_eq!(
            categories
                .iter()
                .map(|c| (c.name.as_str(), c.key.as_str(), c.post_count))
                .collect::<Vec<_>>(),
            vec![
                ("Design", "design", 2),
                ("Personal Growth", "personal-growth", 2),
                ("Writing", "writing", 1),
            ]
        );
    }
}
