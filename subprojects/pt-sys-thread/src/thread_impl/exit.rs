//! Thread exit implementation
//!
//! The exit protocol runs on the exiting thread, after its body returned.

use crate::{id::ThreadId, init};

/// Tears down the calling spawned thread's state.
///
/// Marks the registry entry exited and, if the thread was already detached,
/// removes the entry: nobody else will. A joinable thread leaves the entry
/// for its joiner. The TLS cache keeps the identifier, so `current()` stays
/// stable in destructors that run after this.
pub(crate) fn exit_current(id: ThreadId) {
    let mut registry = init::registry();
    let reclaim = match registry.get_mut(id) {
        Ok(state) => {
            state.mark_exited();
            state.is_reclaimable()
        }
        Err(err) => {
            log::error!("Exit protocol failed: {err}");
            debug_assert!(false, "exiting thread {id} lost its registry entry");
            return;
        }
    };

    if reclaim {
        let _ = registry.remove(id);
        log::trace!("Detached thread {id} exited and reclaimed its entry");
    } else {
        log::trace!("Thread {id} exited, awaiting join");
    }
}

/// Retires the entry of a discovered thread that is ending.
///
/// Runs from the TLS destructor. A discovered thread has no native handle,
/// so no joiner can ever reclaim it: the entry goes regardless of its
/// joinable state.
pub(crate) fn retire_discovered(id: ThreadId) {
    let mut registry = init::registry();
    let Ok(state) = registry.get_mut(id) else {
        return;
    };
    state.mark_exited();

    let _ = registry.remove(id);
    log::trace!("Discovered thread {id} ended and was retired");
}
