//! FFI bindings for thread creation.

use core::ffi::{CStr, c_char, c_void};

use crate::{id::ThreadId, thread_impl as sys};

/// C thread entry point.
pub type ThreadFunc = unsafe extern "C" fn(*mut c_void);

/// An entry point and its argument, moved onto the new thread.
struct Invocation {
    entry: ThreadFunc,
    data: *mut c_void,
}

// SAFETY: The caller of `__pt_sys_thread__create` hands `data` over to the
// new thread.
unsafe impl Send for Invocation {}

impl Invocation {
    fn run(self) {
        // SAFETY: `entry` and `data` were provided together by the C caller.
        unsafe { (self.entry)(self.data) }
    }
}

/// Creates a joinable thread running `entry(data)`.
///
/// `name` may be null. Returns the new thread's identifier, or `0` if the
/// thread could not be created.
///
/// # Safety
///
/// * `entry` must be safe to call with `data` on another thread.
/// * `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_thread__create(
    entry: ThreadFunc,
    data: *mut c_void,
    name: *const c_char,
) -> u32 {
    let mut builder = sys::Builder::new();
    if !name.is_null() {
        // SAFETY: The caller guarantees a valid NUL-terminated string.
        let name = unsafe { CStr::from_ptr(name) };
        builder = builder.name(name.to_string_lossy());
    }

    let invocation = Invocation { entry, data };
    match builder.spawn(move || invocation.run()) {
        Ok(id) => id.into(),
        Err(err) => {
            log::warn!("Thread creation failed: {err}");
            ThreadId::INVALID.into()
        }
    }
}
