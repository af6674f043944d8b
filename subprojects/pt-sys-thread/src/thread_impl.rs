//! Thread Implementation

mod create;
mod current;
mod detach;
mod exit;
mod info;
mod wait;

pub use create::*;
pub use current::*;
pub use detach::*;
pub(crate) use exit::retire_discovered;
pub use info::*;
pub use wait::*;

/// Hints the scheduler to run another thread.
///
/// Purely advisory; no registry state changes.
#[inline]
pub fn yield_now() {
    std::thread::yield_now();
}
