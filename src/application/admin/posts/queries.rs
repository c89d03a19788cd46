use crate::domain::entities::PostRecord;

use super::service::AdminPostService;
use super::types::AdminPostError;

impl AdminPostService {
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>, AdminPostError> {
        self.reader.list_posts().await.map_err(AdminPostError::from)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, AdminPostError> {
        self.reader
            .find_by_slug(slug)
            .await
            .map_err(AdminPostError::from)
    }
}
