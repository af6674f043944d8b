//! # pt-sys-sync
//!
//! Raw synchronization primitives for the portable threading layer.
//!
//! The types in this crate carry no payload and hand out no guards. Callers
//! pair `lock` with `unlock` explicitly and pass the raw [`Mutex`] to
//! [`Condvar`] when waiting. The data-owning, guard-based wrappers live in
//! `pt-std-sync`.
//!
//! Both primitives sit on top of `parking_lot`'s word-sized lock and its
//! parking-lot based condition variable, so neither allocates and both can
//! be placed in `static` storage.

#[cfg(feature = "ffi")]
mod ffi;

mod condvar;
mod mutex;

#[doc(inline)]
pub use self::{
    condvar::{Condvar, MAX_TIMED_WAIT_DEADLINE},
    mutex::Mutex,
};
