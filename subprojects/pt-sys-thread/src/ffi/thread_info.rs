//! FFI bindings for the calling thread's identity.

use crate::thread_impl as sys;

/// Returns the calling thread's identifier, registering it first if the
/// thread was not created by this library.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__current() -> u32 {
    sys::current().into()
}

/// Hints the scheduler to run another thread.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__yield() {
    sys::yield_now();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_non_zero_and_stable() {
        crate::initialize();

        let first = __pt_sys_thread__current();
        __pt_sys_thread__yield();
        let second = __pt_sys_thread__current();

        assert_ne!(first, 0);
        assert_eq!(first, second);
    }
}
