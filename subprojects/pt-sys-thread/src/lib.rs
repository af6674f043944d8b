//! # pt-sys-thread
//!
//! Thread lifecycle management with a process-wide, identifier-indexed
//! thread registry.
//!
//! Every thread known to this crate is named by a [`ThreadId`], a small
//! non-zero integer handed out in increasing order and never reused. Threads
//! created through [`spawn`] start out *joinable*; [`join`] waits for them and
//! reclaims their registry entry, while [`detach`] hands the reclamation over
//! to the thread itself. Threads that were not created here (the process'
//! initial thread, threads from other libraries) receive an identifier the
//! first time they call [`current`].
//!
//! Call [`initialize`] once at start-up, before anything else. Repeated calls
//! are no-ops.

mod id;
mod init;
pub mod registry;
mod thread_impl;
mod tls;

pub use id::ThreadId;
pub use init::*;
pub use registry::{JoinableState, ThreadOrigin, ThreadState};
pub use thread_impl::*;

#[cfg(feature = "ffi")]
mod ffi;
