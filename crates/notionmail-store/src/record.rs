//! Record, query and patch types shared by every store implementation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::property;

/// Property map of a record, keyed by property name.
pub type Properties = Map<String, Value>;

/// Opaque identifier assigned by the store when a record is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Creates a record ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single store-side entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier.
    pub id: RecordId,
    /// Whether the record has been archived (soft-deleted).
    #[serde(default)]
    pub archived: bool,
    /// Structured property values.
    #[serde(default)]
    pub properties: Properties,
}

impl Record {
    /// Returns the raw value of a property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Query filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Text property equals the value exactly (case-sensitive).
    TextEquals {
        /// Property name.
        property: String,
        /// Value to match.
        value: String,
    },
}

impl Filter {
    /// Creates an exact-match filter on a text property.
    #[must_use]
    pub fn text_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::TextEquals {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Returns true if the record satisfies the filter.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::TextEquals { property: name, value } => record
                .property(name)
                .and_then(property::plain_text)
                .is_some_and(|text| text == *value),
        }
    }

    /// Wire representation of the filter.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::TextEquals { property, value } => json!({
                "property": property,
                "rich_text": { "equals": value },
            }),
        }
    }
}

/// Parameters for one page of a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Optional filter; `None` selects every record.
    pub filter: Option<Filter>,
    /// Continuation cursor from a previous page.
    pub start_cursor: Option<String>,
    /// Requested page size (store default if `None`).
    pub page_size: Option<u32>,
}

impl Query {
    /// Creates an unfiltered query starting at the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the continuation cursor.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.start_cursor = cursor;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryPage {
    /// Records on this page, in store order.
    #[serde(rename = "results")]
    pub records: Vec<Record>,
    /// Cursor for the next page, if any.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Change applied by an update call.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Replace the listed properties; all others are left untouched.
    Properties(Properties),
    /// Set the archived flag.
    Archive,
}

impl Patch {
    /// Creates a patch replacing a single property.
    #[must_use]
    pub fn property(name: impl Into<String>, value: Value) -> Self {
        let mut properties = Properties::new();
        properties.insert(name.into(), value);
        Self::Properties(properties)
    }

    /// Wire representation of the patch.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Properties(properties) => json!({ "properties": properties }),
            Self::Archive => json!({ "archived": true }),
        }
    }
}
