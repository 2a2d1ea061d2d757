use tracing::debug;

use crate::{
    field::field_model::{DomField, Highlight},
    page::page_model::{FormNode, Page},
    store::{learned_store::LearnedValueStore, storage::DurableStorage},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub new_forms: usize,
    pub highlighted: usize,
}

/// Suggestion for a raw field, or `None` when it is not an input-capable,
/// non-password control with a non-empty learned value.
fn fillable_suggestion<S: DurableStorage>(
    dom: &DomField,
    store: &LearnedValueStore<S>,
) -> Option<String> {
    let field = dom.as_field()?;
    if field.is_password() {
        return None;
    }

    store
        .suggest(&field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Process every form not yet marked. Marked forms are never revisited.
pub fn check_for_forms<S: DurableStorage>(page: &mut Page, store: &LearnedValueStore<S>) -> ScanReport {
    let mut report = ScanReport::default();

    for form in page.forms.iter_mut().filter(|f| !f.tracker_checked) {
        form.tracker_checked = true;
        form.fill_button = true;
        report.new_forms += 1;
        report.highlighted += check_form_fields(form, store);
    }

    if report.new_forms > 0 {
        debug!(
            new_forms = report.new_forms,
            highlighted = report.highlighted,
            "scanned forms"
        );
    }

    report
}

/// Mark fields that have a learned value. Returns how many were marked.
pub fn check_form_fields<S: DurableStorage>(form: &mut FormNode, store: &LearnedValueStore<S>) -> usize {
    let mut marked = 0;

    for dom in form.fields.iter_mut() {
        if fillable_suggestion(dom, store).is_some() {
            dom.highlight = Some(Highlight::Suggested);
            marked += 1;
        }
    }

    marked
}

/// Write learned values into the form. Does not learn anything.
pub fn auto_fill_form<S: DurableStorage>(form: &mut FormNode, store: &LearnedValueStore<S>) -> usize {
    let mut filled = 0;

    for dom in form.fields.iter_mut() {
        if let Some(value) = fillable_suggestion(dom, store) {
            dom.value = value;
            dom.highlight = Some(Highlight::Filled);
            filled += 1;
        }
    }

    debug!(form = %form.id, filled, "auto-filled form");
    filled
}
