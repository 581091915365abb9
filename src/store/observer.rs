use crate::error::HandlerError;
use serde_json::Value;
use std::sync::Arc;

pub(crate) type Handler = Arc<dyn Fn(&Value) -> Result<(), HandlerError> + Send + Sync>;

struct Observer {
    key: String,
    handler: Handler,
}

/// Observers in registration order. Grows via `observe`, emptied only
/// wholesale.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<Observer>,
}

impl ObserverRegistry {
    pub(crate) fn push(&mut self, key: &str, handler: Handler) {
        self.observers.push(Observer {
            key: key.to_string(),
            handler,
        });
    }

    /// Handlers registered on `key`, in registration order.
    pub(crate) fn handlers_for(&self, key: &str) -> Vec<Handler> {
        self.observers
            .iter()
            .filter(|observer| observer.key == key)
            .map(|observer| Arc::clone(&observer.handler))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.observers.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
