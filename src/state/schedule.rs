//! Deferred and coalesced actions driven by an explicit clock.
//!
//! Nothing here owns a timer. Callers pass the current time in and poll;
//! whatever drives the frame loop decides how often that happens.

/// Milliseconds on the caller's monotonic clock.
pub type Millis = f64;

/// Coalescing slot: the latest value wins and every push restarts the delay.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Millis,
    pending: Option<(T, Millis)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Millis) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the delay from `now`.
    pub fn push(&mut self, value: T, now: Millis) {
        self.pending = Some((value, now + self.delay));
    }

    /// Returns the pending value once its delay has elapsed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some((_, due_at)) if now >= *due_at => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Scheduled<A> {
    due_at: Millis,
    action: A,
}

/// A single cancellable delayed action.
///
/// There is one slot: scheduling again replaces whatever was pending, so an
/// action that was superseded or cancelled can never fire.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<A> {
    slot: Option<Scheduled<A>>,
}

impl<A> Default for Deferred<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Deferred<A> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// Schedules `action` to fire `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, action: A, now: Millis, delay: Millis) {
        self.slot = Some(Scheduled {
            due_at: now + delay.max(0.0),
            action,
        });
    }

    /// Drops the pending action, returning it.
    pub fn cancel(&mut self) -> Option<A> {
        self.slot.take().map(|s| s.action)
    }

    pub fn pending(&self) -> Option<&A> {
        self.slot.as_ref().map(|s| &s.action)
    }

    pub fn due_at(&self) -> Option<Millis> {
        self.slot.as_ref().map(|s| s.due_at)
    }

    /// Takes the pending action if it is due.
    pub fn poll(&mut self, now: Millis) -> Option<A> {
        match &self.slot {
            Some(s) if now >= s.due_at => self.slot.take().map(|s| s.action),
            _ => None,
        }
    }
}
