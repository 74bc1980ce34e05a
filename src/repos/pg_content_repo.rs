/*
 * Responsibility
 * - contents / entities テーブル向け SQLx 操作
 * - 検索条件は QueryBuilder で組み立てる (未指定の条件は SQL に出さない)
 * - text 列 → enum の変換失敗は RepoError::Decode
 */
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::content::{ContentItem, Entity};
use crate::repos::content_repo::{ContentFilter, ContentRepo};
use crate::repos::error::RepoError;

const CONTENT_COLUMNS: &str = r#"
    id, source_id, content_type, content_data, content_html,
    source, category, subject, "timestamp", created_at, updated_at
"#;

#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    source_id: String,
    content_type: String,
    content_data: String,
    content_html: Option<String>,
    source: String,
    category: String,
    subject: Option<String>,
    timestamp: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct EntityRow {
    id: i64,
    content_id: Uuid,
    entity_type: String,
    entity_value: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<EntityRow> for Entity {
    type Error = RepoError;

    fn try_from(row: EntityRow) -> Result<Self, Self::Error> {
        Ok(Entity {
            id: row.id,
            content_id: row.content_id,
            entity_type: row.entity_type.parse()?,
            entity_value: row.entity_value,
            created_at: row.created_at,
        })
    }
}

impl ContentRow {
    fn into_item(self, entities: Vec<Entity>) -> Result<ContentItem, RepoError> {
        Ok(ContentItem {
            id: self.id,
            source_id: self.source_id,
            content_type: self.content_type.parse()?,
            content_data: self.content_data,
            content_html: self.content_html,
            source: self.source.parse()?,
            category: self.category.parse()?,
            subject: self.subject,
            timestamp: self.timestamp,
            created_at: self.created_at,
            updated_at: self.updated_at,
            entities,
        })
    }
}

// `%`, `_` and `\` are literal in user keywords.
fn like_pattern(keywords: &str) -> String {
    let mut escaped = String::with_capacity(keywords.len() + 2);
    escaped.push('%');
    for c in keywords.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn search_query(filter: &ContentFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {CONTENT_COLUMNS} FROM contents WHERE TRUE"));

    if let Some(keywords) = &filter.keywords {
        let pattern = like_pattern(keywords);
        qb.push(" AND (content_data ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR subject ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(start) = filter.start {
        qb.push(r#" AND "timestamp" >= "#).push_bind(start);
    }
    if let Some(end) = filter.end {
        qb.push(r#" AND "timestamp" <= "#).push_bind(end);
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(source) = filter.source {
        qb.push(" AND source = ").push_bind(source.as_str());
    }

    qb.push(r#" ORDER BY "timestamp" DESC, id LIMIT "#)
        .push_bind(filter.limit);
    qb
}

#[derive(Clone, Debug)]
pub struct PgContentRepo {
    db: PgPool,
}

impl PgContentRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn entities_for(&self, content_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Entity>>, RepoError> {
        let mut grouped: HashMap<Uuid, Vec<Entity>> = HashMap::new();
        if content_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = sqlx::query_as::<_, EntityRow>(
            r#"
            SELECT id, content_id, entity_type, entity_value, created_at
            FROM entities
            WHERE content_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(content_ids)
        .fetch_all(&self.db)
        .await?;

        for row in rows {
            let content_id = row.content_id;
            grouped
                .entry(content_id)
                .or_default()
                .push(Entity::try_from(row)?);
        }
        Ok(grouped)
    }

    async fn attach_entities(&self, rows: Vec<ContentRow>) -> Result<Vec<ContentItem>, RepoError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut entities = self.entities_for(&ids).await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let own = entities.remove(&row.id).unwrap_or_default();
            items.push(row.into_item(own)?);
        }
        Ok(items)
    }
}

#[async_trait]
impl ContentRepo for PgContentRepo {
    async fn search(&self, filter: &ContentFilter) -> Result<Vec<ContentItem>, RepoError> {
        let rows = search_query(filter)
            .build_query_as::<ContentRow>()
            .fetch_all(&self.db)
            .await?;

        self.attach_entities(rows).await
    }

    async fn get(&self, content_id: Uuid) -> Result<Option<ContentItem>, RepoError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {CONTENT_COLUMNS} FROM contents WHERE id = $1"
        ))
        .bind(content_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.attach_entities(vec![row]).await?.pop())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::content::{Category, Source};

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rent"), "%rent%");
        assert_eq!(like_pattern("100%_off\\"), "%100\\%\\_off\\\\%");
    }

    #[test]
    fn empty_filter_only_orders_and_limits() {
        let filter = ContentFilter::default();
        let sql = search_query(&filter).into_sql();

        assert!(sql.contains("FROM contents WHERE TRUE ORDER BY"));
        assert!(sql.ends_with("LIMIT $1"));
    }

    #[test]
    fn every_condition_gets_its_own_bind() {
        let filter = ContentFilter {
            keywords: Some("meeting".into()),
            start: Some(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 3, 21, 0, 0, 0).unwrap()),
            category: Some(Category::Meeting),
            source: Some(Source::Email),
            limit: 10,
        };
        let sql = search_query(&filter).into_sql();

        assert!(sql.contains("(content_data ILIKE $1 OR subject ILIKE $2)"));
        assert!(sql.contains(r#""timestamp" >= $3"#));
        assert!(sql.contains(r#""timestamp" <= $4"#));
        assert!(sql.contains("category = $5"));
        assert!(sql.contains("source = $6"));
        assert!(sql.ends_with("LIMIT $7"));
    }

    #[test]
    fn unknown_enum_text_is_a_decode_error() {
        let now = Utc::now();
        let row = ContentRow {
            id: Uuid::new_v4(),
            source_id: "m-1".into(),
            content_type: "text".into(),
            content_data: "hi".into(),
            content_html: None,
            source: "fax".into(),
            category: "other".into(),
            subject: None,
            timestamp: now,
            created_at: now,
            updated_at: now,
        };

        assert!(matches!(row.into_item(vec![]), Err(RepoError::Decode(_))));
    }
}
