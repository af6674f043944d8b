//! FFI bindings for joining and detaching threads.

use crate::{id::ThreadId, thread_impl as sys};

/// Waits for thread `id` to finish and releases its identifier.
///
/// Returns `0` on success and `1` if `id` could not be joined.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__join(id: u32) -> i32 {
    match sys::join(ThreadId::from_raw(id)) {
        Ok(()) => 0,
        Err(err) => {
            log::warn!("Join failed: {err}");
            1
        }
    }
}

/// Detaches thread `id`. Failures are logged and otherwise ignored.
#[unsafe(no_mangle)]
pub extern "C" fn __pt_sys_thread__detach(id: u32) {
    if let Err(err) = sys::detach(ThreadId::from_raw(id)) {
        log::warn!("Detach failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_reports_failure_for_invalid_and_unknown_identifiers() {
        crate::initialize();

        assert_eq!(__pt_sys_thread__join(0), 1);
        assert_eq!(__pt_sys_thread__join(u32::MAX), 1);
    }

    #[test]
    fn join_twice_reports_failure_the_second_time() {
        crate::initialize();
        let id: u32 = sys::spawn(|| {}).unwrap().into();

        assert_eq!(__pt_sys_thread__join(id), 0);
        assert_eq!(__pt_sys_thread__join(id), 1);
    }

    #[test]
    fn detach_of_invalid_identifier_is_absorbed() {
        crate::initialize();

        __pt_sys_thread__detach(0);
        __pt_sys_thread__detach(u32::MAX);
    }

    #[test]
    fn detached_thread_cannot_be_joined() {
        crate::initialize();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let id: u32 = sys::spawn(move || {
            let _ = rx.recv();
        })
        .unwrap()
        .into();

        __pt_sys_thread__detach(id);
        assert_eq!(__pt_sys_thread__join(id), 1);
        drop(tx);
    }
}
