/*
 * Responsibility
 * - Content item / entity types shared by repos and handlers
 * - Enum <-> text mapping (DB columns are plain text)
 */
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

// Each enum keeps its text form in one table so serde, FromStr and
// the SQL binds can't drift apart.
macro_rules! text_enum {
    ($name:ident, $kind:literal, $rename:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = $rename)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Source, "source", "lowercase", {
    Email => "email",
    Telegram => "telegram",
});

text_enum!(Category, "category", "lowercase", {
    Spam => "spam",
    Meeting => "meeting",
    Task => "task",
    Information => "information",
    Idea => "idea",
    Other => "other",
});

text_enum!(ContentType, "content_type", "lowercase", {
    Text => "text",
    Voice => "voice",
});

text_enum!(EntityType, "entity_type", "UPPERCASE", {
    Contact => "CONTACT",
    Date => "DATE",
    Keyword => "KEYWORD",
    Project => "PROJECT",
});

/// Something extracted from a message (a person, a date, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: i64,
    pub content_id: Uuid,
    pub entity_type: EntityType,
    pub entity_value: String,
    pub created_at: DateTime<Utc>,
}

/// A single ingested message (email, telegram text or voice note).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub source_id: String,
    pub content_type: ContentType,
    pub content_data: String,
    pub content_html: Option<String>,
    pub source: Source,
    pub category: Category,
    pub subject: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub entities: Vec<Entity>,
}
