//! Process-wide initialization of the threading layer.
//!
//! All global state of this crate lives in one [`Threading`] singleton: the
//! thread registry, the static-initialization mutex and the record of the
//! process' main thread. The singleton is created by [`initialize`] and lives
//! until the process exits.

use std::sync::OnceLock;

use pt_std_sync::mutex::{Mutex, MutexGuard};
use pt_sys_sync as sys;

use crate::{id::ThreadId, registry::ThreadRegistry, thread_impl};

/// The threading singleton.
static THREADING: OnceLock<Threading> = OnceLock::new();

/// Global state shared by every thread of the process.
pub(crate) struct Threading {
    registry: Mutex<ThreadRegistry>,
    static_init: sys::Mutex,
    main_thread: OnceLock<ThreadId>,
}

impl Threading {
    fn new() -> Self {
        Self {
            registry: Mutex::new(ThreadRegistry::new()),
            static_init: sys::Mutex::new(),
            main_thread: OnceLock::new(),
        }
    }
}

/// Initializes the threading layer.
///
/// Creates the process-wide registry and records the calling thread as the
/// process' *main* thread, registering it like any other discovered thread.
/// Must run before any other function of this crate is relied upon;
/// subsequent calls are no-ops.
pub fn initialize() {
    let threading = threading();
    if threading.main_thread.get().is_some() {
        return;
    }

    let main = thread_impl::current();
    if threading.main_thread.set(main).is_ok() {
        log::debug!("threading initialized, main thread is {main}");
    }
}

/// Returns `true` once [`initialize`] has completed.
pub fn is_initialized() -> bool {
    THREADING
        .get()
        .is_some_and(|threading| threading.main_thread.get().is_some())
}

/// Returns the identifier of the thread that ran [`initialize`] first.
pub fn main_thread() -> Option<ThreadId> {
    THREADING.get()?.main_thread.get().copied()
}

/// Locks the process-wide mutex guarding lazily initialized statics.
///
/// Collaborators use this pair to make their own one-time initialization of
/// static data atomic. Every call must be balanced by
/// [`unlock_atomically_initialized_static_mutex`] on the same thread. The
/// mutex is not reentrant.
pub fn lock_atomically_initialized_static_mutex() {
    debug_assert!(is_initialized(), "static-init mutex used before initialize()");
    threading().static_init.lock();
}

/// Unlocks the mutex taken by [`lock_atomically_initialized_static_mutex`].
///
/// # Safety
///
/// The calling thread must currently hold the static-init mutex.
pub unsafe fn unlock_atomically_initialized_static_mutex() {
    // SAFETY: Forwarded caller contract.
    unsafe { threading().static_init.unlock() };
}

/// Returns the singleton, creating it on first use.
///
/// Creation is lazy so that a thread touching the layer before
/// [`initialize`] finds a consistent, empty registry rather than crashing.
pub(crate) fn threading() -> &'static Threading {
    THREADING.get_or_init(Threading::new)
}

/// Locks the process-wide thread registry.
///
/// The guard must only be held for short, non-blocking critical sections:
/// never across user code or a native join.
pub(crate) fn registry() -> MutexGuard<'static, ThreadRegistry> {
    threading().registry.lock()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        initialize();
        let main = main_thread().expect("main thread recorded");

        initialize();
        initialize();

        assert!(is_initialized());
        assert!(main.is_valid());
        assert_eq!(main_thread(), Some(main));
    }

    #[test]
    fn static_init_mutex_is_exclusive() {
        initialize();

        lock_atomically_initialized_static_mutex();
        let contended = std::thread::spawn(|| threading().static_init.try_lock())
            .join()
            .unwrap();
        unsafe { unlock_atomically_initialized_static_mutex() };

        assert!(!contended);
    }
}
