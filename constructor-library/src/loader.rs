//! Cancellation-safe image loading.
//!
//! The user can switch monuments faster than images download. Each load
//! takes a ticket from a generation counter; when a newer load starts, the
//! older ticket goes stale and its result is dropped instead of clobbering
//! the canvas with an outdated image.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of participation in a load generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Generation counter guarding in-flight loads.
#[derive(Debug, Default)]
pub struct ImageLoader {
    generation: AtomicU64,
}

impl ImageLoader {
    /// Create a loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation }
    }

    /// Whether the ticket still belongs to the newest load.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Run a load under the given ticket. The future's output is returned
    /// only if no newer load started while it ran.
    pub async fn load_with<F, T>(&self, ticket: LoadTicket, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let value = fut.await;
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(generation = ticket.generation, "stale image load dropped");
            None
        }
    }
}
