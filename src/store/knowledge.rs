use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::field_model::{FieldIdentity, FieldKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Identity snapshot from the most recent learn for this key.
    #[serde(rename = "identifiers")]
    pub identity: FieldIdentity,
    pub last_value: String,
    pub occurrences: u64,
}

/// Everything the tracker persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub field_patterns: BTreeMap<FieldKey, FieldRecord>,
    /// Reserved; carried through load/save untouched.
    #[serde(default)]
    pub user_values: Map<String, Value>,
    pub form_count: u64,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn learned_fields(&self) -> usize {
        self.field_patterns.len()
    }

    pub fn record(&self, key: &FieldKey) -> Option<&FieldRecord> {
        self.field_patterns.get(key)
    }

    /// Overwrite the record for `key`, bumping its occurrence count.
    pub(crate) fn upsert(&mut self, key: FieldKey, identity: FieldIdentity, value: &str) -> u64 {
        let occurrences = self
            .field_patterns
            .get(&key)
            .map_or(0, |record| record.occurrences)
            .saturating_add(1);

        self.field_patterns.insert(
            key,
            FieldRecord {
                identity,
                last_value: value.to_string(),
                occurrences,
            },
        );

        occurrences
    }
}
