//! Single-threaded publish/subscribe
//!
//! An [`EventEmitter`] keeps listeners in registration order and runs every
//! one of them, synchronously, on each emission. Listeners receive the
//! payload mutably, so an earlier listener may adjust what later ones see.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{EmitError, ListenerFailure, ListenerResult};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one registration; unique across all emitters in the process
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

impl ListenerToken {
    fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

type Listener<E> = Box<dyn FnMut(&mut E) -> ListenerResult>;

/// Ordered registry of listeners for payload type `E`
pub struct EventEmitter<E> {
    listeners: Vec<(ListenerToken, Listener<E>)>,
}

impl<E> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener; it runs after every listener registered before it
    pub fn subscribe(&mut self, listener: impl FnMut(&mut E) -> ListenerResult + 'static) -> ListenerToken {
        let token = ListenerToken::next();
        self.listeners.push((token, Box::new(listener)));
        token
    }

    /// Remove a listener; returns false if the token is not registered here
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(t, _)| *t != token);
        self.listeners.len() != before
    }

    pub fn contains(&self, token: ListenerToken) -> bool {
        self.listeners.iter().any(|(t, _)| *t == token)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every listener in registration order
    ///
    /// A failing listener does not stop the ones after it. All failures are
    /// returned together once every listener has run.
    pub fn emit(&mut self, event: &mut E) -> Result<(), EmitError> {
        let mut failures = Vec::new();
        for (token, listener) in &mut self.listeners {
            if let Err(source) = listener(&mut *event) {
                log::warn!("listener {:?} failed: {}", token, source);
                failures.push(ListenerFailure { token: *token, source });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EmitError {
                event: short_type_name::<E>(),
                failures,
            })
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
