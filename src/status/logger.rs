use std::{cell::RefCell, fs::OpenOptions, io::Write, path::Path, rc::Rc, sync::Mutex};

use tracing::{info, warn};

use crate::status::status_model::{StatusEvent, StatusObserver};

/// Appends each status event as one JSON line.
pub struct StatusLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl StatusLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!("could not open status log '{}': {}", path.display(), e);
                Self { file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }
}

impl StatusObserver for StatusLogger {
    fn notify(&self, event: &StatusEvent) {
        let file_mutex = match &self.file {
            Some(f) => f,
            None => return,
        };

        let json = match serde_json::to_string(event) {
            Ok(j) => j,
            Err(e) => {
                warn!("failed to serialize status event: {}", e);
                return;
            }
        };

        let mut file = match file_mutex.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!("status log lock poisoned: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", json) {
            warn!("failed to write status event: {}", e);
        }
    }
}

/// Records events in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryObserver {
    events: Rc<RefCell<Vec<StatusEvent>>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StatusEvent> {
        self.events.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn last(&self) -> Option<StatusEvent> {
        self.events.borrow().last().cloned()
    }
}

impl StatusObserver for MemoryObserver {
    fn notify(&self, event: &StatusEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn notify(&self, event: &StatusEvent) {
        info!(
            learned_fields = event.learned_fields,
            forms_tracked = event.forms_tracked,
            "{}",
            event.message
        );
    }
}

/// Fans one event out to several observers.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn StatusObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl StatusObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }
}

impl StatusObserver for ObserverSet {
    fn notify(&self, event: &StatusEvent) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }
}
