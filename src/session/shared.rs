//! Thread-safe session handle.
//!
//! Every command runs under one lock, so moves, turn changes and ledger
//! updates never interleave.

use std::sync::Arc;

use parking_lot::Mutex;

use super::command::{Command, CommandResult};
use super::snapshot::SessionSnapshot;
use super::state::Session;
use crate::core::{Notification, Result};

/// Cloneable handle to one session shared across threads.
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run one command to completion under the lock.
    pub fn execute(&self, command: Command) -> Result<CommandResult> {
        self.inner.lock().execute(command)
    }

    /// Run a closure with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.lock())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.inner.lock().drain_notifications()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::standard;
    use crate::session::SessionStatus;
    use std::thread;

    #[test]
    fn test_concurrent_joins_are_serialized() {
        let shared = SharedSession::new(standard::builder().unwrap().seed(1).build().unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .execute(Command::AddPlayer { name: format!("P{i}") })
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.players.len(), 4);
        let mut ids: Vec<_> = snapshot.players.iter().map(|p| p.id.raw()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(snapshot.players.iter().filter(|p| p.is_host).count(), 1);
    }

    #[test]
    fn test_with_closure() {
        let shared = SharedSession::new(standard::builder().unwrap().seed(1).build().unwrap());
        shared.with(|s| s.add_player("Ada")).unwrap();
        shared.execute(Command::StartGame).unwrap();

        assert_eq!(shared.with(|s| s.status()), SessionStatus::InProgress);
    }
}
