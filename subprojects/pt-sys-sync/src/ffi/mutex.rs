//! FFI bindings for the `pt-sys-sync` crate - Mutex

use crate::mutex::Mutex;

/// Initializes the mutex in the unlocked state.
///
/// # Safety
///
/// `mutex` must be valid for writes and properly aligned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__mutex_init(mutex: *mut Mutex) {
    unsafe { mutex.write(Mutex::new()) }
}

/// Locks the mutex, blocking until it is acquired.
///
/// # Safety
///
/// `mutex` must point to a mutex initialized with
/// [`__pt_sys_sync__mutex_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__mutex_lock(mutex: *mut Mutex) {
    unsafe { &*mutex }.lock()
}

/// Attempts to lock the mutex without waiting.
///
/// Returns `true` if the mutex was acquired.
///
/// # Safety
///
/// `mutex` must point to an initialized mutex.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__mutex_try_lock(mutex: *mut Mutex) -> bool {
    unsafe { &*mutex }.try_lock()
}

/// Unlocks the mutex.
///
/// # Safety
///
/// `mutex` must point to an initialized mutex held by the calling thread.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__mutex_unlock(mutex: *mut Mutex) {
    unsafe { (*mutex).unlock() }
}
