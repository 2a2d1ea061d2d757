use tracing::{debug, warn};

use crate::{
    field::{
        field_model::{FieldElement, FieldKey},
        identity::{derive_key, field_key, field_label, resolve_identity},
    },
    status::status_model::{StatusEvent, StatusObserver},
    store::{
        error::StoreError,
        knowledge::KnowledgeBase,
        storage::DurableStorage,
    },
};

/// Read the knowledge base, surfacing any failure.
pub fn try_load<S: DurableStorage>(storage: &S, key: &str) -> Result<Option<KnowledgeBase>, StoreError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Read the knowledge base. Missing or unreadable data yields an empty one.
pub fn load<S: DurableStorage>(storage: &S, key: &str) -> KnowledgeBase {
    match try_load(storage, key) {
        Ok(Some(kb)) => kb,
        Ok(None) => KnowledgeBase::empty(),
        Err(e) => {
            warn!(kind = ?e.kind(), "error loading knowledge base: {}", e);
            KnowledgeBase::empty()
        }
    }
}

/// Serialize and write the knowledge base.
pub fn try_save<S: DurableStorage>(storage: &mut S, key: &str, kb: &KnowledgeBase) -> Result<(), StoreError> {
    let json = serde_json::to_string(kb).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json)
}

/// The single in-memory knowledge base for one storage namespace.
/// Every mutation is written through to the substrate.
pub struct LearnedValueStore<S: DurableStorage> {
    storage: S,
    storage_key: String,
    kb: KnowledgeBase,
    observer: Box<dyn StatusObserver>,
}

impl<S: DurableStorage> LearnedValueStore<S> {
    pub fn open(storage: S, storage_key: &str, observer: Box<dyn StatusObserver>) -> Self {
        let kb = load(&storage, storage_key);
        debug!(
            learned_fields = kb.learned_fields(),
            form_count = kb.form_count,
            "knowledge base loaded"
        );

        Self {
            storage,
            storage_key: storage_key.to_string(),
            kb,
            observer,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Push a status line with the current counters.
    pub fn report(&self, message: impl ToString) {
        self.observer.notify(&StatusEvent::now(message, &self.kb));
    }

    /// Write through. Failures are reported, never raised, and the
    /// in-memory state stays authoritative.
    pub fn save(&mut self) -> bool {
        match try_save(&mut self.storage, &self.storage_key, &self.kb) {
            Ok(()) => {
                self.report("Knowledge base updated");
                true
            }
            Err(e) => {
                warn!(kind = ?e.kind(), "error saving knowledge base: {}", e);
                self.report("Error saving data");
                false
            }
        }
    }

    /// Learn the field's current value. Empty values and password fields are
    /// skipped. Returns the key that was updated.
    pub fn learn(&mut self, field: &FieldElement<'_>) -> Option<FieldKey> {
        let value = field.value();
        if value.is_empty() || field.is_password() {
            return None;
        }

        let identity = resolve_identity(field);
        let key = derive_key(&identity);
        if key.is_empty() {
            warn!("field has no id, name or placeholder; learning under the empty key");
        }

        let label = field_label(&identity).to_string();
        let occurrences = self.kb.upsert(key.clone(), identity, value);
        debug!(key = %key, occurrences, "learned field value");

        self.save();
        self.report(format!("Learned new value for: {}", label));
        Some(key)
    }

    pub fn record_submission(&mut self) -> u64 {
        self.kb.form_count = self.kb.form_count.saturating_add(1);
        debug!(form_count = self.kb.form_count, "form submission recorded");

        self.save();
        self.report("Form submitted - data saved");
        self.kb.form_count
    }

    /// Last learned value for the field's key. Callers exclude passwords.
    pub fn suggest(&self, field: &FieldElement<'_>) -> Option<&str> {
        self.suggest_key(&field_key(field))
    }

    pub fn suggest_key(&self, key: &FieldKey) -> Option<&str> {
        self.kb.record(key).map(|record| record.last_value.as_str())
    }
}
