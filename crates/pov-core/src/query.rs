//! Query model: the entity term and the category it is looked up under.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of entity an opinion is requested for.
///
/// Parsed once at the service boundary; everything downstream matches on
/// the enum rather than on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Product,
    Movie,
    SocialTopic,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Product, Category::Movie, Category::SocialTopic];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Product => "product",
            Category::Movie => "movie",
            Category::SocialTopic => "social-topic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Topic sub-categories routed to the social collectors.
const SOCIAL_ALIASES: &[&str] = &[
    "social-topic",
    "social_topic",
    "social",
    "topic",
    "game",
    "music",
    "sport",
    "travel",
    "celebrity",
    "politics",
];

impl FromStr for Category {
    type Err = QueryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "product" => Ok(Category::Product),
            "movie" => Ok(Category::Movie),
            v if SOCIAL_ALIASES.contains(&v) => Ok(Category::SocialTopic),
            _ => Err(QueryError::UnknownCategory(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("query term must be non-empty")]
    EmptyTerm,
}

/// An opinion lookup: what to search for and under which category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    term: String,
    category: Category,
}

impl Query {
    /// Build a query, trimming the term.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyTerm`] if the term is blank.
    pub fn new(term: &str, category: Category) -> Result<Self, QueryError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(QueryError::EmptyTerm);
        }
        Ok(Self {
            term: term.to_string(),
            category,
        })
    }

    /// Parse a query from untrusted term and category strings.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for a blank term or an unknown category.
    pub fn parse(term: &str, category: &str) -> Result<Self, QueryError> {
        let category = category.parse::<Category>()?;
        Self::new(term, category)
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}
