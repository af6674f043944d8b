//! # pt-std
//!
//! Portable threading: identifier-based thread lifecycle, mutexes and
//! condition variables.

#[cfg(feature = "sync")]
pub mod sync {
    pub use pt_std_sync::{condvar::*, mutex::*};
}
#[cfg(feature = "thread")]
pub mod thread {
    pub use pt_sys_thread::*;
}

#[cfg(any(feature = "sys", feature = "sys-sync", feature = "sys-thread"))]
pub mod sys {
    #[cfg(any(feature = "sys", feature = "sys-sync"))]
    pub use pt_sys_sync as sync;
    #[cfg(any(feature = "sys", feature = "sys-thread"))]
    pub use pt_sys_thread as thread;
}
