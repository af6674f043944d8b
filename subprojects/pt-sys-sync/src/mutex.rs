//! # Mutex
//!
//! Raw mutual exclusion primitive.
//!
//! A [`Mutex`] protects a critical section rather than a value: the caller
//! brackets the section with [`Mutex::lock`] and [`Mutex::unlock`]. Threads
//! trying to lock an already locked mutex are parked until it becomes
//! available.
//!
//! The mutex is **not** reentrant. A thread that locks a mutex it already
//! holds deadlocks, exactly like a standard non-recursive mutex.

use core::mem;

use static_assertions::assert_impl_all;

/// A raw, guard-less mutual exclusion primitive.
///
/// Internally this is a `parking_lot` mutex over `()`. The guard returned by
/// `parking_lot` is immediately forgotten so the lock outlives the call that
/// acquired it, which is what allows the `lock`/`unlock` pair to be split
/// across functions (and across the C ABI).
pub struct Mutex(pub(crate) parking_lot::Mutex<()>);

assert_impl_all!(Mutex: Send, Sync);

impl Mutex {
    /// Creates a new [`Mutex`] in the unlocked state.
    pub const fn new() -> Self {
        Self(parking_lot::const_mutex(()))
    }

    /// Locks the mutex, blocking the current thread until the lock can be
    /// acquired.
    ///
    /// When the function returns, the current thread is the only thread with
    /// the mutex locked. The underlying lock has no failure path, so there is
    /// nothing to report to the caller.
    pub fn lock(&self) {
        mem::forget(self.0.lock());
    }

    /// Attempts to lock the mutex without blocking.
    ///
    /// # Returns
    ///
    /// * `true` if the mutex was unlocked and is now held by the caller
    /// * `false` if the mutex is currently held (by any thread, including the
    ///   caller)
    pub fn try_lock(&self) -> bool {
        self.0.try_lock().map(mem::forget).is_some()
    }

    /// Unlocks the mutex.
    ///
    /// # Safety
    ///
    /// The current thread must hold the mutex, acquired through [`lock`] or a
    /// successful [`try_lock`]. Unlocking a mutex held by another thread, or
    /// one that is not locked at all, breaks the mutual exclusion of every
    /// other user of the lock.
    ///
    /// [`lock`]: Mutex::lock
    /// [`try_lock`]: Mutex::try_lock
    pub unsafe fn unlock(&self) {
        debug_assert!(self.is_locked(), "unlock of an unlocked mutex");

        // SAFETY: The caller guarantees it holds the lock.
        unsafe { self.0.force_unlock() };
    }

    /// Returns `true` if the mutex is currently held by some thread.
    ///
    /// The answer may already be stale when it is returned. Only use it for
    /// diagnostics and assertions.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.0.is_locked()
    }
}

impl Default for Mutex {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Mutex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mutex")
            .field("locked", &self.is_locked())
            .finish()
    }
}
