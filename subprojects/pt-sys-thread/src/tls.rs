//! Per-thread cache of the current [`ThreadId`].
//!
//! Each thread remembers its own identifier once it is established, so
//! [`crate::current`] only touches the registry the first time. The cache is
//! a plain `Cell` without drop glue: it is never torn down and stays readable
//! from every other TLS destructor that runs while the thread ends.
//!
//! Teardown of *discovered* threads hangs off a second slot. Its destructor
//! retires the thread's registry entry, since no joiner exists that could do
//! it.

use core::cell::Cell;

use crate::{id::ThreadId, thread_impl};

thread_local! {
    static CURRENT: Cell<ThreadId> = const { Cell::new(ThreadId::INVALID) };
    static RETIRE_ON_EXIT: RetireOnExit = const { RetireOnExit(Cell::new(ThreadId::INVALID)) };
}

/// Retires the registry entry of a discovered thread when the thread ends.
struct RetireOnExit(Cell<ThreadId>);

impl Drop for RetireOnExit {
    fn drop(&mut self) {
        let id = self.0.get();
        if id.is_valid() {
            thread_impl::retire_discovered(id);
        }
    }
}

/// Returns the cached identifier, or [`ThreadId::INVALID`] if none is cached.
pub(crate) fn cached() -> ThreadId {
    CURRENT.get()
}

/// Caches `id` for the calling thread for the rest of its life.
pub(crate) fn set(id: ThreadId) {
    CURRENT.set(id);
}

/// Arranges for the discovered thread `id` to be retired when the calling
/// thread ends.
///
/// Returns `false` if the thread is already past its TLS teardown, in which
/// case the caller has to retire the entry itself.
pub(crate) fn retire_on_exit(id: ThreadId) -> bool {
    RETIRE_ON_EXIT.try_with(|slot| slot.0.set(id)).is_ok()
}
