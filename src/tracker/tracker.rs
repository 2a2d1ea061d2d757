use tracing::debug;

use crate::{
    field::field_model::{EventTarget, FieldKey},
    page::{
        page_model::{HostEvent, Page},
        scanner::{auto_fill_form, check_for_forms},
    },
    status::status_model::StatusObserver,
    store::{learned_store::LearnedValueStore, storage::DurableStorage},
};

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Learned(FieldKey),
    Submitted { form_count: u64 },
    Scanned { new_forms: usize, highlighted: usize },
    Filled { form: String, count: usize },
    Ignored,
}

/// Wires host events to the learned-value store for one page.
pub struct FormTracker<S: DurableStorage> {
    store: LearnedValueStore<S>,
    page: Page,
}

impl<S: DurableStorage> FormTracker<S> {
    /// Load from storage, announce, and scan the forms already on the page.
    pub fn install(storage: S, storage_key: &str, observer: Box<dyn StatusObserver>, page: Page) -> Self {
        let store = LearnedValueStore::open(storage, storage_key, observer);
        store.report("Form tracker initialized");

        let mut tracker = Self { store, page };
        tracker.scan();
        tracker
    }

    pub fn store(&self) -> &LearnedValueStore<S> {
        &self.store
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_parts(self) -> (LearnedValueStore<S>, Page) {
        (self.store, self.page)
    }

    pub fn handle(&mut self, event: HostEvent) -> EventOutcome {
        match event {
            HostEvent::Change { target } => match target.target() {
                EventTarget::Field(field) => match self.store.learn(&field) {
                    Some(key) => EventOutcome::Learned(key),
                    None => EventOutcome::Ignored,
                },
                EventTarget::Other { tag } => {
                    debug!(tag, "change on non-input element ignored");
                    EventOutcome::Ignored
                }
            },
            HostEvent::Submit { target } => {
                if target.is_form() {
                    EventOutcome::Submitted {
                        form_count: self.store.record_submission(),
                    }
                } else {
                    EventOutcome::Ignored
                }
            }
            HostEvent::SubtreeInserted { forms } => {
                self.page.forms.extend(forms);
                self.scan()
            }
            HostEvent::FillRequested { form } => self.fill(&form),
        }
    }

    /// Bulk-fill one form from learned values.
    pub fn fill(&mut self, form_id: &str) -> EventOutcome {
        let Some(form) = self.page.form_mut(form_id) else {
            debug!(form = form_id, "fill requested for unknown form");
            return EventOutcome::Ignored;
        };

        let count = auto_fill_form(form, &self.store);
        self.store.report(format!("Auto-filled {} fields", count));
        EventOutcome::Filled {
            form: form_id.to_string(),
            count,
        }
    }

    fn scan(&mut self) -> EventOutcome {
        let report = check_for_forms(&mut self.page, &self.store);
        if report.highlighted > 0 {
            self.store.report("Found fields with saved data");
        }

        EventOutcome::Scanned {
            new_forms: report.new_forms,
            highlighted: report.highlighted,
        }
    }
}
