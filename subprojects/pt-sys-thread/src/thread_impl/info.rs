//! Registry queries for diagnostics.

use crate::{id::ThreadId, init};

/// Returns `true` while `id` has a registry entry.
pub fn is_known(id: ThreadId) -> bool {
    id.is_valid() && init::registry().contains(id)
}

/// Returns whether thread `id` has finished running, or `None` if it is not
/// registered.
pub fn has_exited(id: ThreadId) -> Option<bool> {
    init::registry().get(id).ok().map(|state| state.is_exited())
}

/// Returns the name thread `id` was created with, if any.
pub fn name(id: ThreadId) -> Option<String> {
    init::registry().get(id).ok()?.name().map(ToOwned::to_owned)
}

/// Number of threads currently registered, including exited threads that
/// still wait for a join.
pub fn live_threads() -> usize {
    init::registry().len()
}
