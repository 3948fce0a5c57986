use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{Category, PostId};

/// Post entity - the validated, identifier-free shape of a blog post.
///
/// Field names serialize in camelCase, which is also the layout of stored
/// records. `featured` is skipped when absent so that an omitted flag is
/// never written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub category_label: String,
    pub featured_image: String,
    pub author: String,
    /// Kept exactly as submitted; only checked to be a parseable date.
    pub publish_date: String,
    #[serde(serialize_with = "serialize_reading_time")]
    pub reading_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Whole numbers go out as integers, so a `readingTime` of `7` reads back
/// as `7` rather than `7.0`.
fn serialize_reading_time<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Largest magnitude below which every integer is exactly representable.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// A stored post as exposed to callers: the store identifier mapped to a
/// string `id` alongside the schema fields.
///
/// `extra` holds stored fields outside the schema. Writes never add them,
/// but records that already carry them are passed through on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    #[serde(flatten)]
    pub post: BlogPost,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostRecord {
    pub fn new(id: PostId, post: BlogPost) -> Self {
        Self {
            id,
            post,
            extra: Map::new(),
        }
    }
}

/// Result of a field-set update against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// How a slug is compared against stored slugs on write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugMatch {
    #[default]
    Exact,
    CaseInsensitive,
}

impl std::str::FromStr for SlugMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(SlugMatch::Exact),
            "case-insensitive" | "case_insensitive" | "insensitive" => {
                Ok(SlugMatch::CaseInsensitive)
            }
            other => Err(format!("unknown slug match mode: {other}")),
        }
    }
}

impl SlugMatch {
    /// Compare a requested slug against a stored one.
    pub fn matches(&self, requested: &str, stored: &str) -> bool {
        match self {
            SlugMatch::Exact => requested == stored,
            SlugMatch::CaseInsensitive => requested.to_lowercase() == stored.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlogPost {
        BlogPost {
            slug: "my-post".to_string(),
            title: "My Post".to_string(),
            excerpt: "Short".to_string(),
            content: "Body".to_string(),
            category: Category::Forex,
            category_label: "Forex".to_string(),
            featured_image: "https://img.example.com/a.png".to_string(),
            author: "Sam".to_string(),
            publish_date: "2024-01-01".to_string(),
            reading_time: 5.0,
            featured: None,
        }
    }

    #[test]
    fn test_absent_featured_is_not_serialized() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("featured").is_none());
        assert_eq!(value["categoryLabel"], "Forex");
        assert_eq!(value["readingTime"], 5.0);
    }

    #[test]
    fn test_whole_reading_time_serializes_as_integer() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.ends_with("\"readingTime\":5}"), "{json}");

        let mut post = sample();
        post.reading_time = 4.5;
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["readingTime"], 4.5);

        let back: BlogPost = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reading_time, 5.0);
    }

    #[test]
    fn test_record_passes_extra_fields_through() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["id"] = "65a1f0c2b3d4e5f601234567".into();
        value["tags"] = serde_json::json!(["fx", "macro"]);

        let record: PostRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.post, sample());
        assert_eq!(record.extra.len(), 1);

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["tags"][1], "macro");
        assert_eq!(out["slug"], "my-post");
    }

    #[test]
    fn test_record_flattens_fields_next_to_id() {
        let id = PostId::parse("65a1f0c2b3d4e5f601234567").unwrap();
        let value = serde_json::to_value(PostRecord::new(id, sample())).unwrap();
        assert_eq!(value["id"], "65a1f0c2b3d4e5f601234567");
        assert_eq!(value["slug"], "my-post");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_slug_match_modes() {
        assert!(SlugMatch::Exact.matches("My-Post", "My-Post"));
        assert!(!SlugMatch::Exact.matches("my-post", "My-Post"));
        assert!(SlugMatch::CaseInsensitive.matches("my-post", "My-Post"));
        assert_eq!("case-insensitive".parse(), Ok(SlugMatch::CaseInsensitive));
        assert!("fuzzy".parse::<SlugMatch>().is_err());
    }
}
