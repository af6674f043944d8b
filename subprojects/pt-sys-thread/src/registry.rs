//! # Thread registry (process-wide)
//!
//! The registry maps every [`ThreadId`] currently alive in the process to
//! its [`ThreadState`].
//!
//! ## Design at a glance
//!
//! • **Storage** – A `HashMap<ThreadId, ThreadState>` plus the monotonic
//!   identifier counter. Entries own their state outright; the running thread
//!   only remembers its identifier (see the TLS cache) and never holds a
//!   reference into the map.
//!
//! • **Global access** – The process-wide registry lives inside the
//!   threading singleton behind a single `Mutex<ThreadRegistry>`. Every method
//!   here takes `&self`/`&mut self`, so holding the guard *is* holding the
//!   registry lock.
//!
//! • **Lifetime of an entry** – An entry is inserted when a thread is spawned
//!   or first discovered, and removed exactly once, by whichever of *join*,
//!   *detach* or *self-exit while detached* observes the terminal condition
//!   (exited and no joiner left). All three check and transition under the
//!   same lock, so the removal cannot race.
//!
//! All lookups are `O(1)` except [`ThreadRegistry::lookup_by_native`], which
//! scans the live entries. The number of threads is small in practice so this
//! has not been a concern.

use std::{
    collections::HashMap,
    thread::{self, JoinHandle, ThreadId as NativeThreadId},
};

use crate::id::ThreadId;

/// Whether anybody is still expected to join a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinableState {
    /// The default state. Another thread may block on the thread's completion
    /// and reclaim its entry.
    Joinable,
    /// No joiner will come; the thread reclaims its own entry on exit.
    Detached,
}

/// How a thread came to be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadOrigin {
    /// Created through [`crate::spawn`]; the registry owns its native handle.
    Spawned,
    /// Not created here and registered lazily by [`crate::current`]. There is
    /// no native handle, so the thread can never be joined.
    Discovered,
}

/// Registry-side state of one thread.
#[derive(Debug)]
pub struct ThreadState {
    handle: Option<JoinHandle<()>>,
    joinable: JoinableState,
    exited: bool,
    native_id: NativeThreadId,
    origin: ThreadOrigin,
    name: Option<String>,
}

impl ThreadState {
    /// State for a thread created by this crate, owning its join handle.
    pub(crate) fn spawned(handle: JoinHandle<()>) -> Self {
        let native = handle.thread();
        Self {
            native_id: native.id(),
            name: native.name().map(ToOwned::to_owned),
            handle: Some(handle),
            joinable: JoinableState::Joinable,
            exited: false,
            origin: ThreadOrigin::Spawned,
        }
    }

    /// State for a thread that was not created by this crate.
    pub(crate) fn discovered(native: &thread::Thread) -> Self {
        Self {
            handle: None,
            joinable: JoinableState::Joinable,
            exited: false,
            native_id: native.id(),
            origin: ThreadOrigin::Discovered,
            name: native.name().map(ToOwned::to_owned),
        }
    }

    pub fn joinable_state(&self) -> JoinableState {
        self.joinable
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Identity token of the underlying native thread.
    pub fn native_id(&self) -> NativeThreadId {
        self.native_id
    }

    pub fn origin(&self) -> ThreadOrigin {
        self.origin
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` while the registry still owns the native join handle,
    /// i.e. the thread was spawned here and nobody joined or detached it yet.
    pub fn has_native_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// Terminal condition: nobody is going to reclaim this entry but the
    /// observer of this state.
    pub fn is_reclaimable(&self) -> bool {
        self.exited && self.joinable == JoinableState::Detached
    }

    pub(crate) fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }

    pub(crate) fn mark_exited(&mut self) {
        self.exited = true;
    }

    pub(crate) fn mark_detached(&mut self) {
        self.joinable = JoinableState::Detached;
    }
}

/// Error type for registry lookups.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No entry exists for the identifier.
    #[error("Thread {0} is not registered")]
    NotFound(ThreadId),
}

/// Mapping from [`ThreadId`] to [`ThreadState`].
#[derive(Debug)]
pub struct ThreadRegistry {
    threads: HashMap<ThreadId, ThreadState>,
    next_id: u32,
}

impl ThreadRegistry {
    /// Creates an empty registry whose first identifier will be `1`.
    pub fn new() -> Self {
        Self {
            threads: HashMap::new(),
            next_id: 1,
        }
    }

    /// Inserts `state` under the next unused identifier and returns it.
    pub fn allocate(&mut self, state: ThreadState) -> ThreadId {
        let id = self.reserve();
        self.insert(id, state);
        id
    }

    /// Consumes the next identifier without inserting anything yet.
    ///
    /// Used when the identifier must be known before the state can be built,
    /// e.g. to hand it to a thread that is about to be created. An identifier
    /// that is reserved and never inserted is simply skipped.
    ///
    /// # Panics
    ///
    /// Panics once the 32-bit identifier space is exhausted, since
    /// identifiers are never reused.
    pub fn reserve(&mut self) -> ThreadId {
        let raw = self.next_id;
        let Some(next) = raw.checked_add(1) else {
            panic!("Thread identifier space exhausted: THREAD_ID_OVERFLOW");
        };
        self.next_id = next;
        ThreadId::from_raw(raw)
    }

    /// Inserts `state` under a previously [`reserve`](Self::reserve)d `id`.
    pub fn insert(&mut self, id: ThreadId, state: ThreadState) {
        debug_assert!(id.is_valid() && id.to_raw() < self.next_id, "{id} was never reserved");
        let previous = self.threads.insert(id, state);
        debug_assert!(previous.is_none(), "thread {id} registered twice");
    }

    /// Finds the live (not yet exited) entry belonging to the native thread
    /// `native_id`.
    pub fn lookup_by_native(&self, native_id: NativeThreadId) -> Option<ThreadId> {
        self.threads
            .iter()
            .find(|(_, state)| state.native_id == native_id && !state.exited)
            .map(|(id, _)| *id)
    }

    pub fn get(&self, id: ThreadId) -> Result<&ThreadState, RegistryError> {
        self.threads.get(&id).ok_or(RegistryError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ThreadId) -> Result<&mut ThreadState, RegistryError> {
        self.threads.get_mut(&id).ok_or(RegistryError::NotFound(id))
    }

    /// Erases the entry for `id` and returns its state.
    ///
    /// Only valid once the thread has exited. Removing an entry twice is a
    /// bug in the caller and asserts in debug builds.
    pub fn remove(&mut self, id: ThreadId) -> Result<ThreadState, RegistryError> {
        let state = self.threads.remove(&id);
        debug_assert!(state.is_some(), "thread {id} removed twice");

        let state = state.ok_or(RegistryError::NotFound(id))?;
        debug_assert!(state.exited, "thread {id} removed while still running");
        Ok(state)
    }

    pub fn contains(&self, id: ThreadId) -> bool {
        self.threads.contains_key(&id)
    }

    /// Number of registered threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

impl Default for ThreadRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovered_here() -> ThreadState {
        ThreadState::discovered(&thread::current())
    }

    #[test]
    fn identifiers_start_at_one_and_increase() {
        let mut registry = ThreadRegistry::new();

        let first = registry.allocate(discovered_here());
        let second = registry.allocate(discovered_here());

        assert_eq!(first, ThreadId::from_raw(1));
        assert_eq!(second, ThreadId::from_raw(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn identifiers_are_not_reused_after_removal() {
        let mut registry = ThreadRegistry::new();

        let first = registry.allocate(discovered_here());
        registry.get_mut(first).unwrap().mark_exited();
        registry.remove(first).unwrap();

        let second = registry.allocate(discovered_here());
        assert_ne!(first, second);
        assert!(registry.get(first).is_err());
    }

    #[test]
    fn reserved_identifier_is_skipped_when_never_inserted() {
        let mut registry = ThreadRegistry::new();

        let burned = registry.reserve();
        let next = registry.allocate(discovered_here());

        assert!(!registry.contains(burned));
        assert_eq!(next, ThreadId::from_raw(burned.to_raw() + 1));
    }

    #[test]
    fn lookup_by_native_skips_exited_entries() {
        let mut registry = ThreadRegistry::new();
        let native = thread::current().id();

        let old = registry.allocate(discovered_here());
        assert_eq!(registry.lookup_by_native(native), Some(old));

        registry.get_mut(old).unwrap().mark_exited();
        assert_eq!(registry.lookup_by_native(native), None);
    }

    #[test]
    fn lookup_by_native_ignores_other_threads() {
        let mut registry = ThreadRegistry::new();
        let other = thread::spawn(|| thread::current().id()).join().unwrap();

        registry.allocate(discovered_here());
        assert_eq!(registry.lookup_by_native(other), None);
    }

    #[test]
    fn get_reports_not_found_for_unknown_identifier() {
        let registry = ThreadRegistry::new();
        let unknown = ThreadId::from_raw(9);

        assert_eq!(registry.get(unknown).unwrap_err(), RegistryError::NotFound(unknown));
        assert!(registry.is_empty());
    }

    #[test]
    fn reclaimable_only_when_exited_and_detached() {
        let mut state = discovered_here();
        assert!(!state.is_reclaimable());

        state.mark_detached();
        assert!(!state.is_reclaimable());

        state.mark_exited();
        assert!(state.is_reclaimable());
        assert_eq!(state.joinable_state(), JoinableState::Detached);
    }

    #[test]
    fn discovered_state_has_no_native_handle() {
        let state = discovered_here();

        assert_eq!(state.origin(), ThreadOrigin::Discovered);
        assert!(!state.has_native_handle());
        assert_eq!(state.native_id(), thread::current().id());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "removed twice")]
    fn double_removal_asserts_in_debug_builds() {
        let mut registry = ThreadRegistry::new();
        let id = registry.allocate(discovered_here());
        registry.get_mut(id).unwrap().mark_exited();

        let _ = registry.remove(id);
        let _ = registry.remove(id);
    }
}
