use serde::{Deserialize, Serialize};

use crate::field::field_model::{DomField, FieldElement};

/// Snapshot of the host document, limited to its forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub forms: Vec<FormNode>,
}

impl Page {
    pub fn form(&self, id: &str) -> Option<&FormNode> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut FormNode> {
        self.forms.iter_mut().find(|f| f.id == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormNode {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<DomField>,
    /// Set once the tracker has processed this form.
    #[serde(default)]
    pub tracker_checked: bool,
    /// Auto-fill control injected into the form.
    #[serde(default)]
    pub fill_button: bool,
}

impl FormNode {
    /// Input-capable fields, in document order.
    pub fn inputs(&self) -> impl Iterator<Item = FieldElement<'_>> {
        self.fields.iter().filter_map(DomField::as_field)
    }
}

/// Notifications from the host environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    /// A control committed a new value.
    Change { target: DomField },
    /// Something was submitted; only forms count.
    Submit { target: SubmitTarget },
    /// Nodes were inserted under the document body.
    SubtreeInserted {
        #[serde(default)]
        forms: Vec<FormNode>,
    },
    /// The user clicked a form's auto-fill control.
    FillRequested { form: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTarget {
    pub tag: String,
    #[serde(default)]
    pub id: String,
}

impl SubmitTarget {
    pub fn is_form(&self) -> bool {
        self.tag.eq_ignore_ascii_case("form")
    }
}
