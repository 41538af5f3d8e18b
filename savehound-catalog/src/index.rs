//! In-memory Steam app catalog.
//!
//! Built once per invocation from the raw app list, keyed by app id for
//! constant-time lookups. The index is an immutable snapshot: a refresh
//! builds a new index rather than mutating this one.

use std::collections::HashMap;

use serde_json::Value;

use savehound_core::{CatalogEntry, CatalogFormatError};

/// An index of catalog entries, keyed by app id.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_id: HashMap<u32, usize>,
    entries: Vec<CatalogEntry>,
}

impl CatalogIndex {
    /// Build an index from raw catalog JSON.
    ///
    /// Accepts either a bare array of `{"appid": .., "name": ..}` objects or
    /// the Steam Web API envelope `{"applist": {"apps": [..]}}`. Any element
    /// that is not such a pair rejects the whole catalog.
    pub fn load(raw: &Value) -> Result<Self, CatalogFormatError> {
        let apps = match raw {
            Value::Array(items) => items,
            Value::Object(obj) => obj
                .get("applist")
                .and_then(|a| a.get("apps"))
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    CatalogFormatError::new("expected an array or an applist.apps envelope")
                })?,
            other => {
                return Err(CatalogFormatError::new(format!(
                    "expected an array of entries, found {}",
                    json_kind(other)
                )));
            }
        };

        let mut entries = Vec::with_capacity(apps.len());
        for (i, item) in apps.iter().enumerate() {
            entries.push(parse_entry(i, item)?);
        }
        Ok(Self::from_entries(entries))
    }

    /// Build an index from a JSON string. See [`CatalogIndex::load`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogFormatError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CatalogFormatError::new(format!("not valid JSON: {e}")))?;
        Self::load(&value)
    }

    /// Build an index from already-typed entries.
    ///
    /// Duplicate app ids are resolved by keeping the first entry (later
    /// duplicates are dropped).
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        let mut kept = Vec::with_capacity(entries.len());

        for entry in entries {
            if by_id.contains_key(&entry.app_id) {
                log::debug!("Duplicate app id {} ({}) ignored", entry.app_id, entry.name);
                continue;
            }
            by_id.insert(entry.app_id, kept.len());
            kept.push(entry);
        }

        Self {
            by_id,
            entries: kept,
        }
    }

    /// Look up an entry by app id.
    pub fn lookup_by_id(&self, app_id: u32) -> Option<&CatalogEntry> {
        self.by_id.get(&app_id).map(|&i| &self.entries[i])
    }

    /// All entries in catalog order. Cheap to clone and restart.
    pub fn all_entries(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(index: usize, item: &Value) -> Result<CatalogEntry, CatalogFormatError> {
    let obj = item.as_object().ok_or_else(|| {
        CatalogFormatError::new(format!("entry {index} is {}, not an object", json_kind(item)))
    })?;

    let app_id = obj
        .get("appid")
        .and_then(Value::as_u64)
        .ok_or_else(|| CatalogFormatError::new(format!("entry {index} has no integer appid")))?;
    if app_id == 0 || app_id > u64::from(u32::MAX) {
        return Err(CatalogFormatError::new(format!(
            "entry {index} has out-of-range appid {app_id}"
        )));
    }

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogFormatError::new(format!("entry {index} has no string name")))?;

    Ok(CatalogEntry::new(app_id as u32, name))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
