//! FFI bindings for the `pt-sys-sync` crate
//!
//! C callers allocate storage for the primitives themselves. Both types fit
//! in a single pointer-sized, pointer-aligned slot.

use static_assertions::const_assert;

use crate::{Condvar, Mutex};

mod condvar;
mod mutex;

const_assert!(size_of::<Mutex>() <= size_of::<usize>());
const_assert!(align_of::<Mutex>() <= align_of::<usize>());
const_assert!(size_of::<Condvar>() <= size_of::<usize>());
const_assert!(align_of::<Condvar>() <= align_of::<usize>());
