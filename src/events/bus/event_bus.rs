// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events → same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// The Event Bus
///
/// Services emit facts after a successful mutation; subscribers react
/// without the services depending on them.
///
/// - Synchronous execution (no async, no threads)
/// - Handlers execute in subscription order
/// - A panicking handler does not stop the others
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
    log_capacity: usize,
}

/// Entries kept in the event log before the oldest are dropped
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 1000;

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

// A poisoned lock only means a handler panicked mid-update; the data is still usable.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }

    /// Bus whose event log keeps at most `log_capacity` recent entries
    pub fn with_log_capacity(log_capacity: usize) -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::with_capacity(log_capacity.min(64)))),
            log_capacity,
        }
    }

    /// Subscribe to a specific event type
    ///
    /// ```ignore
    /// bus.subscribe::<MaintenanceRegistered, _>(|event| {
    ///     log::info!("registered {}", event.maintenance_id);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();

        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        write(&self.handlers)
            .entry(type_id)
            .or_default()
            .push(wrapped);
    }

    /// Emit an event
    ///
    /// Logs the event, then runs every handler for its type in
    /// subscription order before returning.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        let handlers = read(&self.handlers);
        let event_handlers = handlers.get(&type_id);

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.map(|h| h.len()).unwrap_or(0),
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type, log_entry.event_id, log_entry.handler_count
        );

        {
            let mut event_log = write(&self.event_log);
            while event_log.len() >= self.log_capacity && event_log.pop_front().is_some() {}
            if self.log_capacity > 0 {
                event_log.push_back(log_entry);
            }
        }

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if let Err(e) = result {
                    log::error!(
                        "Handler {} for {} panicked: {:?}",
                        idx,
                        event.event_type(),
                        e
                    );
                }
            }
        }
    }

    /// Most recent events, oldest first (for debugging)
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        read(&self.event_log).iter().cloned().collect()
    }

    pub fn clear_event_log(&self) {
        write(&self.event_log).clear();
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        read(&self.handlers).get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share handlers and log
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
            log_capacity: self.log_capacity,
        }
    }
}
