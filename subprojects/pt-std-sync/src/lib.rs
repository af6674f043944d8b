//! # pt-std-sync
//!
//! Data-owning synchronization types built on the raw primitives of
//! `pt-sys-sync`. Access to the protected value only ever goes through an
//! RAII guard, so the lock/unlock pairing is enforced by the type system.

pub mod condvar;
pub mod mutex;
mod result;
