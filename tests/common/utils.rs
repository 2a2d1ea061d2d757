use form_learner::{
    field::field_model::DomField,
    page::page_model::FormNode,
    status::logger::MemoryObserver,
    store::{
        learned_store::LearnedValueStore,
        storage::{DEFAULT_STORAGE_KEY, MemoryStorage},
    },
};

pub fn input(id: &str, name: &str, placeholder: &str, field_type: &str, value: &str) -> DomField {
    DomField {
        tag: "input".into(),
        id: id.into(),
        name: name.into(),
        r#type: field_type.into(),
        placeholder: placeholder.into(),
        value: value.into(),
        ..DomField::default()
    }
}

pub fn element(tag: &str, id: &str, value: &str) -> DomField {
    DomField {
        tag: tag.into(),
        id: id.into(),
        value: value.into(),
        ..DomField::default()
    }
}

pub fn form(id: &str, fields: Vec<DomField>) -> FormNode {
    FormNode {
        id: id.into(),
        fields,
        ..FormNode::default()
    }
}

pub fn memory_store(storage: MemoryStorage) -> (LearnedValueStore<MemoryStorage>, MemoryObserver) {
    let observer = MemoryObserver::new();
    let store = LearnedValueStore::open(storage, DEFAULT_STORAGE_KEY, Box::new(observer.clone()));
    (store, observer)
}

/// Learn `value` into a plain text input identified only by `id`.
pub fn learn_id(store: &mut LearnedValueStore<MemoryStorage>, id: &str, value: &str) {
    let dom = input(id, "", "", "text", value);
    let field = dom.as_field().expect("input is input-capable");
    store.learn(&field);
}
