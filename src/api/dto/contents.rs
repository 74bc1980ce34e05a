/*
 * Responsibility
 * - GET /contents/ の query parameter DTO
 * - 日付の解釈と範囲チェック → ContentFilter へ変換
 */
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::domain::content::{Category, Source};
use crate::error::AppError;
use crate::repos::content_repo::{ContentFilter, DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Default, Deserialize)]
pub struct ContentSearchParams {
    pub keywords: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<Category>,
    pub source: Option<Source>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Start,
    End,
}

// `YYYY-MM-DD` covers the whole UTC day; anything else must be RFC 3339.
fn parse_bound(value: &str, bound: Bound) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let start_of_day = date.and_time(NaiveTime::MIN).and_utc();
        return Some(match bound {
            Bound::Start => start_of_day,
            // Postgres timestamps carry microseconds.
            Bound::End => start_of_day + Duration::days(1) - Duration::microseconds(1),
        });
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl ContentSearchParams {
    pub fn into_filter(self) -> Result<ContentFilter, AppError> {
        let start = self
            .start_date
            .as_deref()
            .map(|v| {
                parse_bound(v, Bound::Start).ok_or_else(|| {
                    AppError::bad_request("INVALID_DATE", format!("invalid start_date: {v}"))
                })
            })
            .transpose()?;

        let end = self
            .end_date
            .as_deref()
            .map(|v| {
                parse_bound(v, Bound::End).ok_or_else(|| {
                    AppError::bad_request("INVALID_DATE", format!("invalid end_date: {v}"))
                })
            })
            .transpose()?;

        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(AppError::bad_request(
                "INVALID_DATE_RANGE",
                "start_date must not be after end_date",
            ));
        }

        let keywords = self
            .keywords
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(ContentFilter {
            keywords,
            start,
            end,
            category: self.category,
            source: self.source,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn params(start: Option<&str>, end: Option<&str>) -> ContentSearchParams {
        ContentSearchParams {
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn empty_params_give_default_filter() {
        let filter = ContentSearchParams::default().into_filter().unwrap();
        assert_eq!(filter, ContentFilter::default());
    }

    #[test]
    fn plain_dates_cover_whole_days() {
        let filter = params(Some("2024-03-20"), Some("2024-03-21"))
            .into_filter()
            .unwrap();

        assert_eq!(
            filter.start,
            Some(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap())
        );
        let end = filter.end.unwrap();
        assert!(end > Utc.with_ymd_and_hms(2024, 3, 21, 23, 59, 59).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2024, 3, 22, 0, 0, 0).unwrap());
    }

    #[test]
    fn same_day_range_is_valid() {
        assert!(
            params(Some("2024-03-20"), Some("2024-03-20"))
                .into_filter()
                .is_ok()
        );
    }

    #[test]
    fn rfc3339_instants_are_normalized_to_utc() {
        let filter = params(Some("2024-03-20T09:00:00+09:00"), None)
            .into_filter()
            .unwrap();
        assert_eq!(
            filter.start,
            Some(Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = params(Some("20/03/2024"), None).into_filter().unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest {
                code: "INVALID_DATE",
                ..
            }
        ));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = params(Some("2024-03-21"), Some("2024-03-20"))
            .into_filter()
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::BadRequest {
                code: "INVALID_DATE_RANGE",
                ..
            }
        ));
    }

    #[test]
    fn blank_keywords_are_dropped_and_limit_is_clamped() {
        let filter = ContentSearchParams {
            keywords: Some("   ".into()),
            limit: Some(10_000),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.keywords, None);
        assert_eq!(filter.limit, MAX_LIMIT);

        let filter = ContentSearchParams {
            keywords: Some(" Rent ".into()),
            limit: Some(0),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.keywords.as_deref(), Some("Rent"));
        assert_eq!(filter.limit, 1);
    }
}
