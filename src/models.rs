use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A catalog product as supplied by the storefront export.
///
/// Only `title` and `content` are interpreted; every other field (price,
/// url, image, ...) is carried in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductRecord {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// Attach an opaque pass-through field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// String value of a pass-through field, if present
    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Text that is tokenized for lexical ranking
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A product returned by a search, with its blended relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub record: ProductRecord,
    pub score: f64,
}

/// Per-product score components for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Position of the product in the catalog
    pub index: usize,
    pub lexical: f64,
    pub fuzzy: f64,
    pub score: f64,
}

/// Product card the assistant is asked to fill in its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
}

impl ProductDetails {
    /// Build a product card from a catalog record's pass-through fields
    pub fn from_record(record: &ProductRecord) -> Self {
        let field = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| record.field_str(key))
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: record.title.clone(),
            price: field(&["price"]),
            description: record.content.clone(),
            image_url: field(&["image_url", "image"]),
            url: field(&["url"]),
        }
    }
}

/// Structured answer expected back from the language model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub product_details: Option<Vec<ProductDetails>>,
    #[serde(default)]
    pub order_status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: ChatResponse,
}
