// Locator tables - the named descriptors a page object may reference

use super::descriptor::LocatorDescriptor;
use crate::context::SharedContext;
use crate::element::ElementHandle;
use crate::error::{Error, Result};
use serde_json::Value;

/// Append-only mapping from symbolic name to descriptor.
///
/// Declaration order is preserved. Re-declaring a name is a table defect.
#[derive(Debug, Clone)]
pub struct LocatorTable {
    page: String,
    entries: Vec<(String, LocatorDescriptor)>,
}

impl LocatorTable {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            entries: Vec::new(),
        }
    }

    /// Builds a table from `(name, descriptor)` pairs.
    pub fn from_entries<I, S>(page: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, LocatorDescriptor)>,
        S: Into<String>,
    {
        let mut table = Self::new(page);
        for (name, descriptor) in entries {
            table.insert(name, descriptor)?;
        }
        Ok(table)
    }

    /// Parses a JSON object whose values use the serialized descriptor shapes.
    pub fn from_json(page: impl Into<String>, value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| Error::InvalidLocator {
            descriptor: value.to_string(),
            reason: "locator table must be a JSON object".into(),
        })?;

        let mut table = Self::new(page);
        for (name, raw) in map {
            let descriptor = LocatorDescriptor::try_from(raw.clone())
                .map_err(|e| e.context(format!("{}.{name}", table.page)))?;
            table.insert(name.clone(), descriptor)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, name: impl Into<String>, descriptor: LocatorDescriptor) -> Result<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(Error::InvalidLocator {
                descriptor: descriptor.to_string(),
                reason: format!("'{name}' is already declared on {}", self.page),
            });
        }
        self.entries.push((name, descriptor));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&LocatorDescriptor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocatorDescriptor)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every entry against `context`.
    pub fn resolve(&self, context: &SharedContext) -> Elements {
        let handles = self
            .entries
            .iter()
            .map(|(name, descriptor)| (name.clone(), super::resolve(context, descriptor)))
            .collect();
        Elements {
            page: self.page.clone(),
            handles,
        }
    }
}

/// The resolved handles of one locator table.
#[derive(Clone)]
pub struct Elements {
    page: String,
    handles: Vec<(String, ElementHandle)>,
}

impl Elements {
    /// Looks up a handle by its table name.
    pub fn get(&self, name: &str) -> Result<&ElementHandle> {
        self.handles
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h)
            .ok_or_else(|| Error::UnknownElement {
                page: self.page.clone(),
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(|(n, _)| n.as_str())
    }
}

impl std::fmt::Debug for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Elements")
            .field("page", &self.page)
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
