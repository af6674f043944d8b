//! Result types shared by the locking primitives.

/// An enumeration of possible errors associated with a [`TryLockResult`]
/// which can occur while trying to acquire a lock from the
/// [`try_lock`](crate::mutex::Mutex::try_lock) method.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TryLockError {
    /// The lock could not be acquired at this time because the operation
    /// would otherwise block.
    #[error("try_lock failed because the operation would block")]
    WouldBlock,
}

/// A type alias for the result of a nonblocking locking method.
pub type TryLockResult<Guard> = Result<Guard, TryLockError>;
