//! # Condvar
//!
//! Guard-based condition variable. Waiting consumes a [`MutexGuard`] and
//! hands it back once the thread is woken, so the "mutex held on entry and on
//! exit" contract of the raw [`pt_sys_sync::Condvar`] is upheld by
//! construction.

use core::time::Duration;
use std::time::{Instant, SystemTime};

use pt_sys_sync as sys;

use crate::mutex::{MutexGuard, guard_lock};

/// Whether a timed wait returned because its timeout elapsed.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct WaitTimeoutResult(bool);

impl WaitTimeoutResult {
    /// Returns `true` if the wait ended because the timeout elapsed.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.0
    }
}

/// A condition variable used together with [`crate::mutex::Mutex`].
#[derive(Debug, Default)]
pub struct Condvar {
    inner: sys::Condvar,
}

impl Condvar {
    /// Creates a condition variable with no waiters.
    pub const fn new() -> Self {
        Self {
            inner: sys::Condvar::new(),
        }
    }

    /// Releases the lock behind `guard`, sleeps until notified and returns
    /// the guard with the lock held again.
    pub fn wait<'a, T: ?Sized>(&self, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
        // SAFETY: The guard proves the current thread holds the lock.
        unsafe { self.inner.wait(guard_lock(&guard)) };
        guard
    }

    /// Waits until `condition` returns `false`.
    ///
    /// The condition is checked before the first wait, so a condition that is
    /// already satisfied returns immediately.
    pub fn wait_while<'a, T, F>(
        &self,
        mut guard: MutexGuard<'a, T>,
        mut condition: F,
    ) -> MutexGuard<'a, T>
    where
        T: ?Sized,
        F: FnMut(&mut T) -> bool,
    {
        while condition(&mut *guard) {
            guard = self.wait(guard);
        }
        guard
    }

    /// Waits for a notification for at most `timeout`.
    pub fn wait_timeout<'a, T: ?Sized>(
        &self,
        guard: MutexGuard<'a, T>,
        timeout: Duration,
    ) -> (MutexGuard<'a, T>, WaitTimeoutResult) {
        // SAFETY: The guard proves the current thread holds the lock.
        let woken = unsafe { self.inner.wait_timeout(guard_lock(&guard), timeout) };
        (guard, WaitTimeoutResult(!woken))
    }

    /// Like [`wait_while`](Self::wait_while), giving up after `timeout`.
    ///
    /// The returned result reports a timeout only if the condition still held
    /// when the time ran out.
    pub fn wait_timeout_while<'a, T, F>(
        &self,
        mut guard: MutexGuard<'a, T>,
        timeout: Duration,
        mut condition: F,
    ) -> (MutexGuard<'a, T>, WaitTimeoutResult)
    where
        T: ?Sized,
        F: FnMut(&mut T) -> bool,
    {
        let start = Instant::now();
        loop {
            if !condition(&mut *guard) {
                return (guard, WaitTimeoutResult(false));
            }
            let Some(remaining) = timeout.checked_sub(start.elapsed()) else {
                return (guard, WaitTimeoutResult(true));
            };
            guard = self.wait_timeout(guard, remaining).0;
        }
    }

    /// Waits for a notification until the wall-clock `deadline`.
    ///
    /// Follows [`pt_sys_sync::Condvar::timed_wait`]: a deadline in the past
    /// times out without sleeping, and a deadline past
    /// [`pt_sys_sync::MAX_TIMED_WAIT_DEADLINE`] waits without bound.
    pub fn wait_until<'a, T: ?Sized>(
        &self,
        guard: MutexGuard<'a, T>,
        deadline: SystemTime,
    ) -> (MutexGuard<'a, T>, WaitTimeoutResult) {
        // SAFETY: The guard proves the current thread holds the lock.
        let woken = unsafe { self.inner.timed_wait(guard_lock(&guard), deadline) };
        (guard, WaitTimeoutResult(!woken))
    }

    /// Wakes up one blocked thread, if any.
    #[inline]
    pub fn notify_one(&self) {
        self.inner.wake_one();
    }

    /// Wakes up all blocked threads.
    #[inline]
    pub fn notify_all(&self) {
        self.inner.wake_all();
    }
}
