//! Tool entity - a registered capability the selector can recommend.
//!
//! Tools are registered and updated by an external process; this service
//! only reads them. The `name` is unique across the catalog and is the key
//! used to map a model's textual answer back to a concrete tool.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, ToolId};

/// Text shown to models when a tool has no description.
pub const NO_DESCRIPTION: &str = "No description available";

/// A registered tool as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Numeric catalog identifier.
    pub id: ToolId,
    /// Stable external identifier.
    pub uuid: Uuid,
    /// Human-readable unique name.
    pub name: String,
    /// Registered version string.
    pub version: String,
    /// Free-text description used for ranking and prompting.
    pub description: Option<String>,
    /// Opaque engine invocation descriptor.
    pub engine_interface: serde_json::Value,
    /// Opaque provider (HTTP surface) descriptor.
    pub provider_interface: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tool {
    /// Creates a tool with empty interface descriptors.
    ///
    /// Mostly useful for tests and in-memory catalogs; real tools come from
    /// the catalog store fully populated.
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>, version: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            uuid: Uuid::new_v4(),
            name: name.into(),
            version: version.into(),
            description: None,
            engine_interface: serde_json::Value::Null,
            provider_interface: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the stable UUID.
    pub fn with_uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// Sets both interface descriptors.
    pub fn with_interfaces(
        mut self,
        engine_interface: serde_json::Value,
        provider_interface: serde_json::Value,
    ) -> Self {
        self.engine_interface = engine_interface;
        self.provider_interface = provider_interface;
        self
    }

    /// Sets creation and update timestamps.
    pub fn with_timestamps(mut self, created_at: Timestamp, updated_at: Timestamp) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Text embedded for similarity ranking (empty when undescribed).
    pub fn embedding_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Description as presented to a language model.
    ///
    /// Only a missing or empty description falls back to [`NO_DESCRIPTION`];
    /// whitespace is passed through as stored.
    pub fn prompt_description(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => NO_DESCRIPTION,
        }
    }

    /// Exact, case-sensitive name comparison used for resolution.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
