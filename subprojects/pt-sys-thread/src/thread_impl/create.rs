//! Thread creation implementation
//!
//! A new thread's registry entry is inserted while the registry lock is held
//! around the native thread creation. The thread body cannot reach its own
//! exit protocol (which takes the same lock) before the entry exists, and the
//! caller never sees an identifier that [`join`](super::join) or
//! [`detach`](super::detach) would reject as unknown.

use std::{
    any::Any,
    io,
    panic::{self, AssertUnwindSafe},
    process, thread,
};

use super::exit;
use crate::{id::ThreadId, init, registry::ThreadState, tls};

/// Thread factory, used to configure the properties of a new thread.
///
/// ```rust,ignore
/// let id = pt_sys_thread::Builder::new()
///     .name("worker")
///     .spawn(|| do_work())?;
/// pt_sys_thread::join(id)?;
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the thread. The name shows up in panic messages, debuggers and
    /// [`crate::name`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the size of the new thread's stack in bytes.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Spawns a new joinable thread running `f` and returns its identifier.
    ///
    /// `f` must not panic. A panic escaping the thread body is treated as
    /// unrecoverable and aborts the process, since there is no channel to
    /// carry it to another thread.
    ///
    /// # Errors
    ///
    /// * [`SpawnError::InvalidName`] if the name contains a NUL byte
    /// * [`SpawnError::Create`] if the native thread could not be created
    pub fn spawn<F>(self, f: F) -> Result<ThreadId, SpawnError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut native = thread::Builder::new();
        if let Some(name) = self.name {
            if name.contains('\0') {
                return Err(SpawnError::InvalidName);
            }
            native = native.name(name);
        }
        if let Some(size) = self.stack_size {
            native = native.stack_size(size);
        }

        let mut registry = init::registry();
        let id = registry.reserve();

        let handle = native
            .spawn(move || thread_entry(id, f))
            .map_err(|err| {
                log::error!("Failed to create native thread for {id}: {err}");
                SpawnError::Create(err)
            })?;

        registry.insert(id, ThreadState::spawned(handle));
        drop(registry);

        log::debug!("Spawned thread {id}");
        Ok(id)
    }
}

/// Spawns a new joinable thread running `f` with default settings.
///
/// See [`Builder::spawn`].
pub fn spawn<F>(f: F) -> Result<ThreadId, SpawnError>
where
    F: FnOnce() + Send + 'static,
{
    Builder::new().spawn(f)
}

/// Body of every spawned thread.
fn thread_entry<F: FnOnce()>(id: ThreadId, f: F) {
    tls::set(id);

    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        log::error!(
            "Thread {id} terminated by a panic: {}",
            panic_message(payload.as_ref())
        );
        process::abort();
    }

    exit::exit_current(id);
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

/// Error type for [`spawn`] and [`Builder::spawn`].
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// The requested thread name contains an interior NUL byte.
    #[error("Thread name contains a NUL byte")]
    InvalidName,

    /// The operating system refused to create the thread, typically because
    /// a resource limit was reached.
    #[error("Native thread creation failed: {0}")]
    Create(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{Arc, Barrier},
    };

    use super::*;
    use crate::{current, is_known, join, name};

    #[test]
    fn spawned_identifiers_are_valid_and_distinct() {
        crate::initialize();
        let gate = Arc::new(Barrier::new(5));

        let ids: Vec<_> = (0..4)
            .map(|_| {
                let gate = Arc::clone(&gate);
                spawn(move || {
                    gate.wait();
                })
                .unwrap()
            })
            .collect();

        // All four are alive at the same time here.
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| id.is_valid() && is_known(*id)));

        gate.wait();
        for id in ids {
            join(id).unwrap();
        }
    }

    #[test]
    fn thread_sees_its_own_identifier() {
        crate::initialize();
        let (tx, rx) = std::sync::mpsc::channel();

        let id = spawn(move || {
            tx.send((current(), current())).unwrap();
        })
        .unwrap();
        let (first, second) = rx.recv().unwrap();
        join(id).unwrap();

        assert_eq!(first, id);
        assert_eq!(second, id);
    }

    #[test]
    fn builder_name_is_recorded() {
        crate::initialize();
        let gate = Arc::new(Barrier::new(2));

        let id = {
            let gate = Arc::clone(&gate);
            Builder::new()
                .name("registry-worker")
                .spawn(move || {
                    gate.wait();
                })
                .unwrap()
        };

        assert_eq!(name(id).as_deref(), Some("registry-worker"));
        gate.wait();
        join(id).unwrap();
    }

    #[test]
    fn name_with_nul_byte_is_rejected() {
        crate::initialize();

        let result = Builder::new().name("bad\0name").spawn(|| {});

        assert!(matches!(result, Err(SpawnError::InvalidName)));
    }

    #[test]
    fn panic_message_handles_common_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7u8);

        assert_eq!(panic_message(literal.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "<non-string panic payload>");
    }
}
