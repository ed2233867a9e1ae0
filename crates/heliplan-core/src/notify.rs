// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::engine::CalculationResult;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Event fired after every successful calculation.
pub const ON_CALCULATION_COMPLETE: &str = "onCalculationComplete";

pub type Listener = Arc<dyn Fn(&CalculationResult) + Send + Sync>;

/// One listener per event name. Registering again replaces the previous listener.
#[derive(Default)]
pub struct EventSlots {
    slots: RwLock<HashMap<String, Listener>>,
}

impl fmt::Debug for EventSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("EventSlots")
            .field("events", &slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EventSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the listener that was replaced, if any.
    pub fn register(&self, event: &str, listener: Listener) -> Option<Listener> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        let previous = slots.insert(event.to_string(), listener);
        if previous.is_some() {
            debug!("Replaced existing listener — event={}", event);
        }
        previous
    }

    pub fn unregister(&self, event: &str) -> Option<Listener> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.remove(event)
    }

    pub fn is_registered(&self, event: &str) -> bool {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        slots.contains_key(event)
    }

    /// Calls the listener for `event` exactly once. Returns false when nobody is listening.
    pub fn emit(&self, event: &str, result: &CalculationResult) -> bool {
        // Clone out of the lock so the listener may register or calculate again.
        let listener = {
            let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
            slots.get(event).cloned()
        };
        match listener {
            Some(listener) => {
                listener(result);
                true
            }
            None => false,
        }
    }
}
