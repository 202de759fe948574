use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::session::{Session, TriggerState};

/// Holds the trigger in `Pending` for as long as it lives and puts it back to
/// `Ready` when dropped, whichever way the request ended.
pub struct PendingGuard<'a> {
    session: &'a mut Session,
}

impl<'a> PendingGuard<'a> {
    /// Returns `None` when a request is already in flight.
    pub fn acquire(session: &'a mut Session) -> Option<Self> {
        if session.in_flight() {
            return None;
        }
        session.trigger = TriggerState::Pending;
        debug!("trigger pending");
        Some(Self { session })
    }
}

impl Deref for PendingGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for PendingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.session.trigger = TriggerState::Ready;
        debug!("trigger ready");
    }
}
