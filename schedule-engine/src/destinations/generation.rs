//! Generation tokens and the caller-owned result store.
//!
//! Every run for a logical slot (e.g. one slide's destination table) starts
//! by taking a new generation. When the run finishes it commits its results
//! in full, and the commit is refused if a newer run has started since.
//! Late responses therefore never overwrite newer state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::EngineError;

/// Identifies one run for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Generation {
    slot: String,
    value: u64,
}

impl Generation {
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

/// Per-slot results, replaced in full by the latest generation only.
#[derive(Debug)]
pub struct ResultStore<T> {
    slots: Mutex<HashMap<String, Slot<T>>>,
}

impl<T: Clone> ResultStore<T> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new run for `slot`, superseding any run in flight.
    pub fn begin(&self, slot: &str) -> Generation {
        let mut slots = self.lock();
        let entry = slots.entry(slot.to_string()).or_insert(Slot {
            generation: 0,
            value: None,
        });
        entry.generation += 1;

        Generation {
            slot: slot.to_string(),
            value: entry.generation,
        }
    }

    /// Whether `generation` is still the latest run of its slot.
    pub fn is_current(&self, generation: &Generation) -> bool {
        self.lock()
            .get(&generation.slot)
            .is_some_and(|s| s.generation == generation.value)
    }

    /// Replace the slot's value if `generation` is still current.
    pub fn commit(&self, generation: &Generation, value: T) -> Result<(), EngineError> {
        let mut slots = self.lock();
        match slots.get_mut(&generation.slot) {
            Some(slot) if slot.generation == generation.value => {
                slot.value = Some(value);
                Ok(())
            }
            _ => Err(EngineError::StaleGeneration {
                slot: generation.slot.clone(),
                generation: generation.value,
            }),
        }
    }

    /// The last committed value of `slot`.
    pub fn get(&self, slot: &str) -> Option<T> {
        self.lock().get(slot).and_then(|s| s.value.clone())
    }
}

impl<T: Clone> Default for ResultStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
