//! In-memory tool catalog.
//!
//! Holds tools in a vector behind an `RwLock`. Used by tests and by local
//! development setups without a database.

use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

use crate::domain::catalog::Tool;
use crate::ports::{CatalogError, ToolCatalog};

/// Vector-backed catalog with the same exact-match semantics as Postgres.
#[derive(Debug, Default)]
pub struct InMemoryToolCatalog {
    tools: RwLock<Vec<Tool>>,
    unavailable: RwLock<Option<String>>,
}

impl InMemoryToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools(tools: Vec<Tool>) -> Self {
        Self {
            tools: RwLock::new(tools),
            unavailable: RwLock::new(None),
        }
    }

    /// Adds a tool, replacing any existing tool with the same name.
    pub fn insert(&self, tool: Tool) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        tools.retain(|t| t.name != tool.name);
        tools.push(tool);
    }

    /// Makes every subsequent read fail with `CatalogError::Unavailable`.
    pub fn set_unavailable(&self, reason: impl Into<String>) {
        *self.unavailable.write().unwrap_or_else(PoisonError::into_inner) = Some(reason.into());
    }

    pub fn len(&self) -> usize {
        self.tools.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        match self
            .unavailable
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(reason) => Err(CatalogError::unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ToolCatalog for InMemoryToolCatalog {
    async fn list_all(&self) -> Result<Vec<Tool>, CatalogError> {
        self.check_available()?;
        Ok(self
            .tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Tool, CatalogError> {
        self.check_available()?;
        self.tools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.is_named(name))
            .cloned()
            .ok_or_else(|| CatalogError::not_found(name))
    }
}
