//! Routing of chat messages to the product or policy retriever

use serde::Deserialize;
use serde::Serialize;

use crate::search::fold;

/// Folded keywords that mark a message as a store-policy question
const POLICY_KEYWORDS: &[&str] = &["policy", "chinh sach"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryRoute {
    /// Product lookup against the catalog index
    Product,
    /// Store policy and service questions
    Policy,
}

impl std::fmt::Display for QueryRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Policy => write!(f, "policy"),
        }
    }
}

/// Pick a retriever for `message`. Anything that is not clearly about
/// policy goes to product search.
pub fn route_query(message: &str) -> QueryRoute {
    let folded = fold(message);
    if POLICY_KEYWORDS.iter().any(|keyword| folded.contains(keyword)) {
        QueryRoute::Policy
    } else {
        QueryRoute::Product
    }
}
