//! Waiting for thread completion
//!
//! The native join may block for an arbitrary time, so it runs *outside* the
//! registry lock: the handle is taken out of the entry under the lock, the
//! lock is released, the join blocks, and the lock is taken again only to
//! remove the entry.

use crate::{id::ThreadId, init, registry::JoinableState, tls};

/// Blocks until the thread `id` has finished and reclaims its registry entry.
///
/// Must be called at most once per identifier, and only for a joinable
/// thread spawned by this crate.
///
/// # Errors
///
/// * [`JoinError::InvalidIdentifier`] if `id` is invalid or not registered
/// * [`JoinError::Detached`] if the thread was detached
/// * [`JoinError::NotJoinable`] if the thread was not spawned here or is
///   already being joined
/// * [`JoinError::SelfJoin`] if the calling thread is `id` itself
/// * [`JoinError::Native`] if the native join failed; the entry is still
///   reclaimed
pub fn join(id: ThreadId) -> Result<(), JoinError> {
    if !id.is_valid() {
        return Err(JoinError::InvalidIdentifier(id));
    }
    if tls::cached() == id {
        return Err(JoinError::SelfJoin(id));
    }

    let handle = {
        let mut registry = init::registry();
        let state = registry
            .get_mut(id)
            .map_err(|_| JoinError::InvalidIdentifier(id))?;

        if state.joinable_state() == JoinableState::Detached {
            return Err(JoinError::Detached(id));
        }
        state.take_handle().ok_or(JoinError::NotJoinable(id))?
    };

    let joined = handle.join();

    {
        let mut registry = init::registry();
        if let Ok(state) = registry.get(id) {
            debug_assert_eq!(state.joinable_state(), JoinableState::Joinable);
            debug_assert!(state.is_exited(), "joined thread {id} never ran its exit protocol");
        }
        let _ = registry.remove(id);
    }

    joined.map_err(|_| {
        log::error!("Thread {id} could not be joined");
        JoinError::Native(id)
    })?;

    log::debug!("Joined thread {id}");
    Ok(())
}

/// Error type returned by [`join`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    /// The identifier is invalid or names no registered thread.
    #[error("Invalid thread identifier {0}")]
    InvalidIdentifier(ThreadId),

    /// The thread was detached and can no longer be joined.
    #[error("Thread {0} is detached")]
    Detached(ThreadId),

    /// The thread has no native handle to join: it was not spawned by this
    /// crate, or another thread is already joining it.
    #[error("Thread {0} is not joinable")]
    NotJoinable(ThreadId),

    /// A thread tried to join itself.
    #[error("Thread {0} attempted to join itself")]
    SelfJoin(ThreadId),

    /// The native join reported a failure.
    #[error("Native join of thread {0} failed")]
    Native(ThreadId),
}
