//! Cancellation of in-flight fetches tied to a page's lifetime.
//!
//! A page holds one [`PageScope`]. Each fetch takes a [`Ticket`] before it starts and
//! checks it before writing its result. Tearing the page down or changing the fetch
//! parameters bumps the scope's generation, so every older ticket goes stale and late
//! responses are dropped instead of landing in state nobody is showing.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct PageScope {
    generation: Rc<Cell<u64>>,
    closed: Rc<Cell<bool>>,
}

impl PartialEq for PageScope {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.generation, &other.generation)
    }
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation.get(),
            scope: self.clone(),
        }
    }

    /// Invalidates outstanding tickets while keeping the scope usable.
    pub fn renew(&self) {
        self.generation.set(self.generation.get() + 1);
        trace!(generation = self.generation.get(), "Page scope renewed");
    }

    /// Invalidates outstanding tickets and every ticket issued afterwards.
    pub fn cancel(&self) {
        self.closed.set(true);
        self.renew();
    }

    pub fn is_cancelled(&self) -> bool {
        self.closed.get()
    }
}

/// Proof that a fetch was started in the current generation of its page scope.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    scope: PageScope,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        !self.scope.is_cancelled() && self.scope.generation.get() == self.generation
    }
}
