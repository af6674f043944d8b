//! # Mutex
//!
//! A value-owning mutex. The protected value is reachable only through a
//! [`MutexGuard`], and dropping the guard releases the underlying raw
//! [`pt_sys_sync::Mutex`].

use core::{
    cell::UnsafeCell,
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use pt_sys_sync as sys;

pub use crate::result::{TryLockError, TryLockResult};

/// A mutual exclusion primitive protecting a value of type `T`.
///
/// Locking is not reentrant: calling [`lock`] while the current thread
/// already holds a guard for the same mutex never returns.
///
/// [`lock`]: Mutex::lock
pub struct Mutex<T: ?Sized> {
    inner: sys::Mutex,
    data: UnsafeCell<T>,
}

unsafe impl<T: ?Sized + Send> Send for Mutex<T> {}
unsafe impl<T: ?Sized + Send> Sync for Mutex<T> {}

impl<T> Mutex<T> {
    /// Creates a new, unlocked mutex holding `data`.
    #[inline]
    pub const fn new(data: T) -> Mutex<T> {
        Mutex {
            inner: sys::Mutex::new(),
            data: UnsafeCell::new(data),
        }
    }

    /// Consumes the mutex and returns the protected value.
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: ?Sized> Mutex<T> {
    /// Blocks the current thread until the lock is acquired and returns a
    /// guard granting exclusive access to the value.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock();

        // SAFETY: The lock was acquired just above.
        unsafe { MutexGuard::new(self) }
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryLockError::WouldBlock`] if the mutex is currently held.
    pub fn try_lock(&self) -> TryLockResult<MutexGuard<'_, T>> {
        if !self.inner.try_lock() {
            return Err(TryLockError::WouldBlock);
        }

        // SAFETY: The lock was acquired just above.
        Ok(unsafe { MutexGuard::new(self) })
    }

    /// Returns `true` if some thread currently holds the lock.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }

    /// Returns a mutable reference to the protected value.
    ///
    /// The exclusive borrow of the mutex proves no guard exists, so no
    /// locking takes place.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }
}

impl<T> From<T> for Mutex<T> {
    fn from(t: T) -> Self {
        Mutex::new(t)
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Mutex<T> {
        Mutex::new(T::default())
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Mutex");
        match self.try_lock() {
            Ok(guard) => d.field("data", &&*guard),
            Err(TryLockError::WouldBlock) => d.field("data", &format_args!("<locked>")),
        };
        d.finish_non_exhaustive()
    }
}

/// RAII guard for a locked [`Mutex`].
///
/// The guard is neither `Send` nor transferable to another thread: the lock
/// must be released by the thread that took it.
#[must_use = "if unused the Mutex will immediately unlock"]
#[clippy::has_significant_drop]
pub struct MutexGuard<'a, T: ?Sized + 'a> {
    lock: &'a Mutex<T>,
    _not_send: PhantomData<*const ()>,
}

unsafe impl<T: ?Sized + Sync> Sync for MutexGuard<'_, T> {}

impl<'a, T: ?Sized> MutexGuard<'a, T> {
    /// # Safety
    ///
    /// The current thread must hold `lock.inner`.
    unsafe fn new(lock: &'a Mutex<T>) -> MutexGuard<'a, T> {
        MutexGuard {
            lock,
            _not_send: PhantomData,
        }
    }
}

impl<T: ?Sized> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: The guard proves the lock is held.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: The guard proves the lock is held, exclusively.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for MutexGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: The guard was created by the thread holding the lock and
        // guards cannot leave that thread.
        unsafe { self.lock.inner.unlock() };
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for MutexGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// Returns the raw lock behind `guard`, for the condition variable.
pub(crate) fn guard_lock<'a, T: ?Sized>(guard: &MutexGuard<'a, T>) -> &'a sys::Mutex {
    &guard.lock.inner
}
