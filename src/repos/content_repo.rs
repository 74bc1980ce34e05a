/*
 * Responsibility
 * - contents の検索条件 (ContentFilter) と repo interface
 * - handler は trait だけを見る (Postgres / in-memory を差し替え可能に)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::content::{Category, ContentItem, Source};
use crate::repos::error::RepoError;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 500;

/// Search conditions. `None` means "no constraint".
///
/// Both time bounds are inclusive and compare against `ContentItem::timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFilter {
    pub keywords: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub source: Option<Source>,
    pub limit: i64,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            keywords: None,
            start: None,
            end: None,
            category: None,
            source: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Read access to stored content.
///
/// Implementations must be shareable across request tasks.
#[async_trait]
pub trait ContentRepo: Send + Sync + 'static {
    /// Items matching `filter`, newest `timestamp` first, at most `filter.limit`.
    async fn search(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>, RepoError>;

    async fn get(&self, content_id: Uuid) -> Result<Option<ContentItem>, RepoError>;
}
