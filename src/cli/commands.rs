use crate::cli::config::{FieldArgs, Settings};
use crate::field::field_model::{DomField, FieldKey};
use crate::page::page_model::{HostEvent, Page, SubmitTarget};
use crate::status::logger::{MemoryObserver, ObserverSet, StatusLogger, TracingObserver};
use crate::store::learned_store::LearnedValueStore;
use crate::store::storage::FileStorage;
use crate::tracker::tracker::{EventOutcome, FormTracker};

// ============================================================================
// learn / submit / suggest subcommands
// ============================================================================

pub fn cmd_learn(
    settings: &Settings,
    field: &FieldArgs,
    tag: &str,
    value: &str,
) -> Result<Option<FieldKey>, Box<dyn std::error::Error>> {
    let observer = MemoryObserver::new();
    let mut tracker = open_tracker(settings, Page::default(), &observer);

    let target = dom_field(field, tag, value);
    let learned = match tracker.handle(HostEvent::Change { target }) {
        EventOutcome::Learned(key) => Some(key),
        _ => None,
    };

    match &learned {
        Some(key) => println!("Learned '{}'", key),
        None => println!("Nothing learned (empty value, password, or non-input element)"),
    }
    print_banner(&observer);

    Ok(learned)
}

pub fn cmd_submit(settings: &Settings, tag: &str) -> Result<Option<u64>, Box<dyn std::error::Error>> {
    let observer = MemoryObserver::new();
    let mut tracker = open_tracker(settings, Page::default(), &observer);

    let target = SubmitTarget {
        tag: tag.to_string(),
        id: String::new(),
    };
    let form_count = match tracker.handle(HostEvent::Submit { target }) {
        EventOutcome::Submitted { form_count } => Some(form_count),
        _ => None,
    };
    print_banner(&observer);

    Ok(form_count)
}

/// Learned value for a field. Password fields never get one.
pub fn cmd_suggest(settings: &Settings, field: &FieldArgs, tag: &str) -> Option<String> {
    let store = open_store(settings, &MemoryObserver::new());
    let dom = dom_field(field, tag, "");
    let field = dom.as_field()?;
    if field.is_password() {
        return None;
    }

    store.suggest(&field).map(str::to_string)
}

// ============================================================================
// fill / replay subcommands
// ============================================================================

/// Fill one form of a page snapshot and return the fill count.
pub fn cmd_fill(
    settings: &Settings,
    page_path: &str,
    form_id: &str,
    output: Option<&str>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let page = load_page(page_path)?;
    if page.form(form_id).is_none() {
        return Err(format!("form '{}' not found in {}", form_id, page_path).into());
    }

    let observer = MemoryObserver::new();
    let mut tracker = open_tracker(settings, page, &observer);
    let count = match tracker.fill(form_id) {
        EventOutcome::Filled { count, .. } => count,
        _ => 0,
    };

    let json = serde_json::to_string_pretty(tracker.page())?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("Auto-filled {} fields", count);
        }
        None => println!("{}", json),
    }

    Ok(count)
}

/// Replay a list of host events against a page; returns each outcome.
pub fn cmd_replay(
    settings: &Settings,
    page_path: &str,
    events_path: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<Vec<EventOutcome>, Box<dyn std::error::Error>> {
    let page = load_page(page_path)?;
    let events: Vec<HostEvent> = serde_json::from_str(&std::fs::read_to_string(events_path)?)?;

    let observer = MemoryObserver::new();
    let mut tracker = open_tracker(settings, page, &observer);

    let mut outcomes = Vec::with_capacity(events.len());
    for event in events {
        let outcome = tracker.handle(event);
        if verbose > 0 {
            eprintln!("  {:?}", outcome);
        }
        outcomes.push(outcome);
    }

    print_banner(&observer);

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(tracker.page())?)?;
    }

    Ok(outcomes)
}

// ============================================================================
// status subcommand
// ============================================================================

pub fn cmd_status(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let observer = MemoryObserver::new();
    let store = open_store(settings, &observer);
    store.report("Knowledge base loaded");
    print_banner(&observer);

    for (key, record) in &store.knowledge().field_patterns {
        println!(
            "  {:<40} {:>4}x  {}",
            display_key(key),
            record.occurrences,
            record.last_value
        );
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn observers(settings: &Settings, memory: &MemoryObserver) -> Box<ObserverSet> {
    let mut set = ObserverSet::new()
        .with(TracingObserver)
        .with(memory.clone());
    if let Some(path) = &settings.status_log {
        set = set.with(StatusLogger::new(path));
    }
    Box::new(set)
}

fn open_store(settings: &Settings, memory: &MemoryObserver) -> LearnedValueStore<FileStorage> {
    LearnedValueStore::open(
        FileStorage::new(&settings.data_dir),
        &settings.storage_key,
        observers(settings, memory),
    )
}

fn open_tracker(settings: &Settings, page: Page, memory: &MemoryObserver) -> FormTracker<FileStorage> {
    FormTracker::install(
        FileStorage::new(&settings.data_dir),
        &settings.storage_key,
        observers(settings, memory),
        page,
    )
}

pub fn load_page(path: &str) -> Result<Page, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn dom_field(field: &FieldArgs, tag: &str, value: &str) -> DomField {
    DomField {
        tag: tag.to_string(),
        id: field.id.clone(),
        name: field.name.clone(),
        r#type: field.field_type.clone(),
        placeholder: field.placeholder.clone(),
        value: value.to_string(),
        ..DomField::default()
    }
}

fn display_key(key: &FieldKey) -> &str {
    if key.is_empty() { "<empty>" } else { key.as_str() }
}

fn print_banner(observer: &MemoryObserver) {
    if let Some(event) = observer.last() {
        print!("{}", event.render());
    }
}
