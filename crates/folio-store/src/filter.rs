//! Typed database query filters and sorts.
//!
//! Filters are built in Rust and rendered to the store's JSON filter object
//! only at the HTTP boundary, so fakes can inspect them structurally.

use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Property { property: String, condition: Condition },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    RichTextEquals(String),
    RelationContains(String),
    /// ISO date, inclusive.
    DateOnOrBefore(String),
}

impl Filter {
    pub fn property(property: impl Into<String>, condition: Condition) -> Self {
        Self::Property {
            property: property.into(),
            condition,
        }
    }

    /// Every `(property, condition)` leaf, depth first.
    #[must_use]
    pub fn conditions(&self) -> Vec<(&str, &Condition)> {
        match self {
            Self::And(filters) => {
                filters.iter().flat_map(Self::conditions).collect()
            }
            Self::Property {
                property,
                condition,
            } => vec![(property.as_str(), condition)],
        }
    }

    /// Render the store's filter object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::And(filters) => json!({ "and": filters.iter().map(Self::to_json).collect::<Vec<_>>() }),
            Self::Property {
                property,
                condition,
            } => {
                let (kind, predicate) = match condition {
                    Condition::RichTextEquals(v) => ("rich_text", json!({ "equals": v })),
                    Condition::RelationContains(v) => ("relation", json!({ "contains": v })),
                    Condition::DateOnOrBefore(v) => ("date", json!({ "on_or_before": v })),
                };
                let mut object = serde_json::Map::new();
                object.insert("property".to_string(), Value::String(property.clone()));
                object.insert(kind.to_string(), predicate);
                Value::Object(object)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let direction = match self.direction {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        };
        json!({ "property": self.property, "direction": direction })
    }
}
