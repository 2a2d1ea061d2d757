use crate::field::field_model::{FieldElement, FieldIdentity, FieldKey};

const KEY_DELIMITER: &str = "_";

pub fn resolve_identity(field: &FieldElement<'_>) -> FieldIdentity {
    let dom = field.dom();

    FieldIdentity {
        identifier: dom.id.clone(),
        name: dom.name.clone(),
        r#type: field.field_type().to_string(),
        placeholder: dom.placeholder.clone(),
        class_list: dom.class_list.clone(),
    }
}

/// Join the non-empty identifier, name and placeholder, lowercase, and
/// replace every UTF-16 unit outside `[a-z0-9_]` with `_`.
///
/// Type and classes do not participate, so two fields sharing the triple
/// share a key. An all-empty triple yields the empty key.
pub fn derive_key(identity: &FieldIdentity) -> FieldKey {
    let joined = [
        identity.identifier.as_str(),
        identity.name.as_str(),
        identity.placeholder.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(KEY_DELIMITER);

    let mut normalized = String::with_capacity(joined.len());
    for c in joined.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            normalized.push(c);
        } else {
            // One `_` per UTF-16 unit, so astral characters become `__`.
            normalized.extend(std::iter::repeat_n('_', c.len_utf16()));
        }
    }

    FieldKey::from_normalized(normalized)
}

pub fn field_key(field: &FieldElement<'_>) -> FieldKey {
    derive_key(&resolve_identity(field))
}

/// Human label for status lines: name, then id, then "field".
pub fn field_label(identity: &FieldIdentity) -> &str {
    if !identity.name.is_empty() {
        &identity.name
    } else if !identity.identifier.is_empty() {
        &identity.identifier
    } else {
        "field"
    }
}
