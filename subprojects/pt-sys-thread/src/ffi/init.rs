//! FFI bindings for process initialization and the static-init mutex.

use crate::init;

/// Initializes the threading layer. Idempotent.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__initialize() {
    init::initialize();
}

/// Locks the process-wide static-initialization mutex.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__lock_static_init() {
    init::lock_atomically_initialized_static_mutex();
}

/// Unlocks the process-wide static-initialization mutex.
///
/// # Safety
///
/// The calling thread must hold the mutex, taken with
/// [`__pt_sys_thread__lock_static_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_thread__unlock_static_init() {
    // SAFETY: Forwarded caller contract.
    unsafe { init::unlock_atomically_initialized_static_mutex() }
}
