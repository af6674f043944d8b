//! # Condition Variable
//!
//! A condition variable lets threads sleep until some condition, protected by
//! a [`Mutex`], may have changed. Waiting always happens against the raw
//! mutex the caller already holds: the mutex is released atomically with
//! going to sleep and reacquired before any wait function returns, whether
//! the thread was woken, timed out or woke spuriously.
//!
//! Waking is either targeted at one waiter ([`Condvar::wake_one`], the
//! classic *signal*) or at every current waiter ([`Condvar::wake_all`], the
//! classic *broadcast*).

use core::{mem, time::Duration};
use std::time::{SystemTime, UNIX_EPOCH};

use static_assertions::assert_impl_all;

use super::Mutex;

/// Upper bound, measured from [`UNIX_EPOCH`], for deadlines accepted by
/// [`Condvar::timed_wait`].
///
/// Deadlines further in the future than `UNIX_EPOCH + MAX_TIMED_WAIT_DEADLINE`
/// are treated as "no deadline" and the call degrades to an unbounded
/// [`Condvar::wait`]. The bound is the largest number of seconds a signed
/// 32-bit integer holds.
pub const MAX_TIMED_WAIT_DEADLINE: Duration = Duration::from_secs(i32::MAX as u64);

/// A condition variable primitive for thread synchronization.
pub struct Condvar(parking_lot::Condvar);

assert_impl_all!(Condvar: Send, Sync);

impl Condvar {
    /// Creates a new condition variable with no waiters.
    pub const fn new() -> Self {
        Self(parking_lot::Condvar::new())
    }

    /// Blocks the current thread until this condition variable is woken.
    ///
    /// The mutex is atomically released while sleeping and reacquired before
    /// returning. Spurious wake-ups are possible, so callers should re-check
    /// their condition in a loop.
    ///
    /// # Safety
    ///
    /// The current thread must hold `mutex`.
    pub unsafe fn wait(&self, mutex: &Mutex) {
        debug_assert!(mutex.is_locked(), "condvar wait without holding the mutex");

        // SAFETY: The caller holds the lock, so a guard may be materialized
        // for it. Forgetting the guard afterwards keeps the lock held on
        // return.
        let mut guard = unsafe { mutex.0.make_guard_unchecked() };
        self.0.wait(&mut guard);
        mem::forget(guard);
    }

    /// Waits on the condition variable for at most `timeout`.
    ///
    /// # Returns
    ///
    /// * `true` if the thread was woken before the timeout elapsed
    /// * `false` if the timeout elapsed
    ///
    /// In both cases the mutex is held again when the function returns.
    ///
    /// # Safety
    ///
    /// The current thread must hold `mutex`.
    pub unsafe fn wait_timeout(&self, mutex: &Mutex, timeout: Duration) -> bool {
        debug_assert!(mutex.is_locked(), "condvar wait without holding the mutex");

        // SAFETY: See `wait`.
        let mut guard = unsafe { mutex.0.make_guard_unchecked() };
        let result = self.0.wait_for(&mut guard, timeout);
        mem::forget(guard);

        !result.timed_out()
    }

    /// Waits on the condition variable until the absolute wall-clock
    /// `deadline`.
    ///
    /// * If `deadline` has already passed, returns `false` immediately without
    ///   releasing the mutex.
    /// * If `deadline` lies beyond `UNIX_EPOCH + MAX_TIMED_WAIT_DEADLINE`, the
    ///   wait is unbounded and the function returns `true` once woken.
    /// * Otherwise waits at most until `deadline`, returning `true` iff woken
    ///   before it.
    ///
    /// # Safety
    ///
    /// The current thread must hold `mutex`.
    pub unsafe fn timed_wait(&self, mutex: &Mutex, deadline: SystemTime) -> bool {
        let Ok(remaining) = deadline.duration_since(SystemTime::now()) else {
            return false;
        };

        if is_unbounded(deadline) {
            // SAFETY: Forwarded caller contract.
            unsafe { self.wait(mutex) };
            return true;
        }

        // SAFETY: Forwarded caller contract.
        unsafe { self.wait_timeout(mutex, remaining) }
    }

    /// Wakes up one thread blocked on this condition variable, if any.
    ///
    /// Returns `true` if a thread was woken.
    #[inline]
    pub fn wake_one(&self) -> bool {
        self.0.notify_one()
    }

    /// Wakes up every thread currently blocked on this condition variable.
    ///
    /// Returns the number of threads woken.
    #[inline]
    pub fn wake_all(&self) -> usize {
        self.0.notify_all()
    }
}

impl Default for Condvar {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Condvar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Condvar").finish_non_exhaustive()
    }
}

fn is_unbounded(deadline: SystemTime) -> bool {
    deadline
        .duration_since(UNIX_EPOCH)
        .is_ok_and(|since_epoch| since_epoch > MAX_TIMED_WAIT_DEADLINE)
}
