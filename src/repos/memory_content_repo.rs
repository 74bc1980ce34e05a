//! In-memory `ContentRepo` for handler tests.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::ContentItem;
use crate::repos::content_repo::{ContentFilter, ContentRepo};
use crate::repos::error::RepoError;

// Same semantics as the ILIKE match in the Postgres repo.
fn matches_keywords(filter: &ContentFilter, item: &ContentItem) -> bool {
    let Some(keywords) = &filter.keywords else {
        return true;
    };
    let needle = keywords.to_lowercase();
    item.content_data.to_lowercase().contains(&needle)
        || item
            .subject
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&needle))
}

#[derive(Debug, Default)]
pub struct MemoryContentRepo {
    items: Vec<ContentItem>,
}

impl MemoryContentRepo {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl ContentRepo for MemoryContentRepo {
    async fn search(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>, RepoError> {
        let mut found: Vec<ContentItem> = self
            .items
            .iter()
            .filter(|item| matches_keywords(filter, item))
            .filter(|item| filter.start.is_none_or(|start| item.timestamp >= start))
            .filter(|item| filter.end.is_none_or(|end| item.timestamp <= end))
            .filter(|item| filter.category.is_none_or(|c| item.category == c))
            .filter(|item| filter.source.is_none_or(|s| item.source == s))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(a.id.cmp(&b.id)));
        found.truncate(usize::try_from(filter.limit).unwrap_or(0));
        Ok(found)
    }

    async fn get(&self, content_id: Uuid) -> Result<Option<ContentItem>, RepoError> {
        Ok(self.items.iter().find(|item| item.id == content_id).cloned())
    }
}
