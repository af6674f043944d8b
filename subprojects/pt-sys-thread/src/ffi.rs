//! FFI bindings for the `pt-sys-thread` crate
//!
//! Thread identifiers cross the boundary as plain `u32` values, with `0`
//! meaning "no thread".

mod init;
mod thread_create;
mod thread_info;
mod thread_wait;
