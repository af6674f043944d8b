//! Detaching threads

use crate::{
    id::ThreadId,
    init,
    registry::{JoinableState, ThreadOrigin},
};

/// Gives up the right to join thread `id`.
///
/// If the thread already exited its entry is removed right away, since no
/// joiner will come. Otherwise the entry is flagged detached and the thread
/// removes it itself when it exits. The check and the transition happen
/// under the registry lock, so the entry is removed exactly once whichever
/// side gets there last.
///
/// # Errors
///
/// * [`DetachError::InvalidIdentifier`] if `id` is invalid or not registered
/// * [`DetachError::AlreadyDetached`] if `id` was detached before
/// * [`DetachError::NotJoinable`] if another thread is currently joining `id`
pub fn detach(id: ThreadId) -> Result<(), DetachError> {
    if !id.is_valid() {
        return Err(DetachError::InvalidIdentifier(id));
    }

    let mut registry = init::registry();
    let state = registry
        .get_mut(id)
        .map_err(|_| DetachError::InvalidIdentifier(id))?;

    if state.joinable_state() == JoinableState::Detached {
        return Err(DetachError::AlreadyDetached(id));
    }

    if state.origin() == ThreadOrigin::Spawned {
        // Dropping the join handle detaches the native thread.
        let Some(handle) = state.take_handle() else {
            return Err(DetachError::NotJoinable(id));
        };
        drop(handle);
    }

    if state.is_exited() {
        let _ = registry.remove(id);
        log::trace!("Detached thread {id} had already exited, entry removed");
    } else {
        state.mark_detached();
        log::trace!("Detached thread {id}");
    }

    Ok(())
}

/// Error type returned by [`detach`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DetachError {
    /// The identifier is invalid or names no registered thread.
    #[error("Invalid thread identifier {0}")]
    InvalidIdentifier(ThreadId),

    /// The thread was already detached.
    #[error("Thread {0} is already detached")]
    AlreadyDetached(ThreadId),

    /// Another thread is joining this one.
    #[error("Thread {0} is being joined")]
    NotJoinable(ThreadId),
}

#[cfg(test)]
mod tests {
    use std::{
        sync::mpsc,
        thread,
        time::{Duration, Instant},
    };

    use super::*;
    use crate::{is_known, spawn};

    fn wait_until_forgotten(id: ThreadId) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while is_known(id) {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(2));
        }
        true
    }

    #[test]
    fn detach_then_exit_reclaims_automatically() {
        crate::initialize();
        let (tx, rx) = mpsc::channel::<()>();

        let id = spawn(move || {
            let _ = rx.recv();
        })
        .unwrap();
        detach(id).unwrap();
        assert!(is_known(id));

        drop(tx);
        assert!(wait_until_forgotten(id));
    }

    #[test]
    fn exit_then_detach_removes_immediately() {
        crate::initialize();
        let (tx, rx) = mpsc::channel();

        let id = spawn(move || tx.send(()).unwrap()).unwrap();
        rx.recv().unwrap();

        // Wait for the exit protocol to mark the entry exited.
        let deadline = Instant::now() + Duration::from_secs(5);
        while !crate::has_exited(id).unwrap_or(true) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }

        detach(id).unwrap();
        assert!(!is_known(id));
    }

    #[test]
    fn second_detach_is_rejected() {
        crate::initialize();
        let (tx, rx) = mpsc::channel::<()>();

        let id = spawn(move || {
            let _ = rx.recv();
        })
        .unwrap();
        detach(id).unwrap();

        assert_eq!(detach(id), Err(DetachError::AlreadyDetached(id)));
        drop(tx);
        assert!(wait_until_forgotten(id));
    }

    #[test]
    fn detach_rejects_the_invalid_identifier() {
        assert_eq!(
            detach(ThreadId::INVALID),
            Err(DetachError::InvalidIdentifier(ThreadId::INVALID))
        );
    }
}
