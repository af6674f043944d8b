//! Identifier of the calling thread.

use std::thread;

use crate::{id::ThreadId, init, registry::ThreadState, tls};

/// Returns the identifier of the calling thread.
///
/// Threads spawned by this crate get their identifier from the TLS cache.
/// Any other thread is looked up by its native identity and, if unknown,
/// registered on the spot as a [discovered](crate::ThreadOrigin::Discovered) thread.
/// Either way the result is non-zero and stable for the rest of the thread's
/// life, including its TLS destructors.
pub fn current() -> ThreadId {
    let cached = tls::cached();
    if cached.is_valid() {
        return cached;
    }

    let native = thread::current();
    let (id, discovered) = {
        let mut registry = init::registry();
        match registry.lookup_by_native(native.id()) {
            Some(id) => (id, false),
            None => {
                let id = registry.allocate(ThreadState::discovered(&native));
                log::trace!("Discovered thread {id} ({:?})", native.id());
                (id, true)
            }
        }
    };

    tls::set(id);
    if discovered && !tls::retire_on_exit(id) {
        // Already past TLS teardown: nothing would retire the entry later.
        super::retire_discovered(id);
    }
    id
}
