use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// Raw field payload as reported by the host, one per DOM element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomField {
    pub tag: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub class_list: Vec<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

/// Visual marker the host applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Highlight {
    /// Field has a learned value available.
    Suggested,
    /// Field was just written by auto-fill.
    Filled,
}

/// Input-capable controls. Anything else never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    TextInput,
    Selection,
    MultiLineText,
}

impl FieldKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("input") {
            Some(FieldKind::TextInput)
        } else if tag.eq_ignore_ascii_case("select") {
            Some(FieldKind::Selection)
        } else if tag.eq_ignore_ascii_case("textarea") {
            Some(FieldKind::MultiLineText)
        } else {
            None
        }
    }

    /// The `type` a DOM control reports when the attribute is absent.
    pub fn default_type(&self) -> &'static str {
        match self {
            FieldKind::TextInput => "text",
            FieldKind::Selection => "select-one",
            FieldKind::MultiLineText => "textarea",
        }
    }
}

/// A field proven to be input-capable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldElement<'a> {
    TextInput(&'a DomField),
    Selection(&'a DomField),
    MultiLineText(&'a DomField),
}

impl<'a> FieldElement<'a> {
    pub fn new(kind: FieldKind, dom: &'a DomField) -> Self {
        match kind {
            FieldKind::TextInput => FieldElement::TextInput(dom),
            FieldKind::Selection => FieldElement::Selection(dom),
            FieldKind::MultiLineText => FieldElement::MultiLineText(dom),
        }
    }

    pub fn dom(&self) -> &'a DomField {
        match self {
            FieldElement::TextInput(dom)
            | FieldElement::Selection(dom)
            | FieldElement::MultiLineText(dom) => dom,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldElement::TextInput(_) => FieldKind::TextInput,
            FieldElement::Selection(_) => FieldKind::Selection,
            FieldElement::MultiLineText(_) => FieldKind::MultiLineText,
        }
    }

    pub fn field_type(&self) -> &'a str {
        let dom = self.dom();
        if dom.r#type.is_empty() {
            self.kind().default_type()
        } else {
            &dom.r#type
        }
    }

    pub fn value(&self) -> &'a str {
        &self.dom().value
    }

    pub fn is_password(&self) -> bool {
        self.field_type() == "password"
    }
}

/// What an event was dispatched on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventTarget<'a> {
    Field(FieldElement<'a>),
    Other { tag: &'a str },
}

impl DomField {
    pub fn target(&self) -> EventTarget<'_> {
        match FieldKind::from_tag(&self.tag) {
            Some(kind) => EventTarget::Field(FieldElement::new(kind, self)),
            None => EventTarget::Other { tag: &self.tag },
        }
    }

    pub fn as_field(&self) -> Option<FieldElement<'_>> {
        match self.target() {
            EventTarget::Field(field) => Some(field),
            EventTarget::Other { .. } => None,
        }
    }
}

/// Static attributes read from a field at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIdentity {
    #[serde(rename = "id", default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub class_list: Vec<String>,
}

/// Normalized field key. Built by `identity::derive_key`; stored keys
/// outside `[a-z0-9_]*` are rejected on load.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        if FieldKey::is_normalized(&key) {
            Ok(FieldKey(key))
        } else {
            Err(D::Error::custom(format!("field key '{}' is not normalized", key)))
        }
    }
}

impl FieldKey {
    pub fn is_normalized(key: &str) -> bool {
        key.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    }

    pub(crate) fn from_normalized(key: String) -> Self {
        FieldKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
