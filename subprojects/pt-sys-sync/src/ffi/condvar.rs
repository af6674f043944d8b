//! FFI bindings for the `pt-sys-sync` crate - Condvar
//!
//! Deadlines cross the ABI as wall-clock seconds since the Unix epoch,
//! stored in an `f64`.

use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    condvar::{Condvar, MAX_TIMED_WAIT_DEADLINE},
    mutex::Mutex,
};

/// Initializes a condition variable.
///
/// # Safety
///
/// `condvar` must be valid for writes and properly aligned.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__condvar_init(condvar: *mut Condvar) {
    unsafe { condvar.write(Condvar::new()) };
}

/// Waits on a condition variable until woken.
///
/// On return the mutex is held again by the caller.
///
/// # Safety
///
/// * `condvar` and `mutex` must point to initialized primitives
/// * The calling thread must hold `mutex`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__condvar_wait(condvar: *mut Condvar, mutex: *mut Mutex) {
    let mutex = unsafe { &*mutex };
    unsafe { (*condvar).wait(mutex) }
}

/// Waits on a condition variable until woken or until `abs_seconds`
/// (seconds since the Unix epoch) has passed.
///
/// Returns `true` if woken before the deadline, `false` on timeout or when
/// the deadline was already in the past. A NaN deadline is treated as
/// already expired.
///
/// # Safety
///
/// * `condvar` and `mutex` must point to initialized primitives
/// * The calling thread must hold `mutex`
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__condvar_timed_wait(
    condvar: *mut Condvar,
    mutex: *mut Mutex,
    abs_seconds: f64,
) -> bool {
    let mutex = unsafe { &*mutex };
    unsafe { (*condvar).timed_wait(mutex, deadline_from_epoch_secs(abs_seconds)) }
}

/// Wakes up one thread waiting on the condition variable.
///
/// # Safety
///
/// `condvar` must point to an initialized condition variable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__condvar_signal(condvar: *mut Condvar) {
    unsafe { &*condvar }.wake_one();
}

/// Wakes up every thread waiting on the condition variable.
///
/// # Safety
///
/// `condvar` must point to an initialized condition variable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn __pt_sys_sync__condvar_broadcast(condvar: *mut Condvar) {
    unsafe { &*condvar }.wake_all();
}

fn deadline_from_epoch_secs(secs: f64) -> SystemTime {
    if secs.is_nan() {
        log::warn!("condvar timed wait called with a NaN deadline");
        return UNIX_EPOCH;
    }
    if secs <= 0.0 {
        return UNIX_EPOCH;
    }

    // Anything past the bound waits unbounded, so clamping just beyond it
    // keeps infinities and huge values representable.
    let past_bound = MAX_TIMED_WAIT_DEADLINE + Duration::from_secs(1);
    let since_epoch = Duration::try_from_secs_f64(secs).map_or(past_bound, |d| d.min(past_bound));
    UNIX_EPOCH + since_epoch
}

#[cfg(test)]
mod tests {
    use core::mem::MaybeUninit;

    use super::*;
    use crate::ffi::mutex::{
        __pt_sys_sync__mutex_init, __pt_sys_sync__mutex_lock, __pt_sys_sync__mutex_try_lock,
        __pt_sys_sync__mutex_unlock,
    };

    #[test]
    fn nan_and_non_positive_deadlines_map_to_the_epoch() {
        assert_eq!(deadline_from_epoch_secs(f64::NAN), UNIX_EPOCH);
        assert_eq!(deadline_from_epoch_secs(0.0), UNIX_EPOCH);
        assert_eq!(deadline_from_epoch_secs(-12.5), UNIX_EPOCH);
        assert_eq!(deadline_from_epoch_secs(f64::NEG_INFINITY), UNIX_EPOCH);
    }

    #[test]
    fn huge_deadlines_clamp_past_the_bound() {
        let past_bound = UNIX_EPOCH + MAX_TIMED_WAIT_DEADLINE + Duration::from_secs(1);

        assert_eq!(deadline_from_epoch_secs(f64::INFINITY), past_bound);
        assert_eq!(deadline_from_epoch_secs(1e300), past_bound);
        assert_eq!(deadline_from_epoch_secs(i32::MAX as f64 + 10.0), past_bound);
    }

    #[test]
    fn fractional_deadlines_keep_sub_second_precision() {
        assert_eq!(deadline_from_epoch_secs(1.5), UNIX_EPOCH + Duration::from_millis(1500));
    }

    #[test]
    fn timed_wait_with_past_deadline_returns_false_with_mutex_held() {
        let mut mutex = MaybeUninit::<Mutex>::uninit();
        let mut condvar = MaybeUninit::<Condvar>::uninit();

        unsafe {
            __pt_sys_sync__mutex_init(mutex.as_mut_ptr());
            __pt_sys_sync__condvar_init(condvar.as_mut_ptr());
            __pt_sys_sync__mutex_lock(mutex.as_mut_ptr());

            let woken =
                __pt_sys_sync__condvar_timed_wait(condvar.as_mut_ptr(), mutex.as_mut_ptr(), 1.0);
            assert!(!woken);
            assert!(!__pt_sys_sync__mutex_try_lock(mutex.as_mut_ptr()));

            __pt_sys_sync__mutex_unlock(mutex.as_mut_ptr());
            assert!(__pt_sys_sync__mutex_try_lock(mutex.as_mut_ptr()));
            __pt_sys_sync__mutex_unlock(mutex.as_mut_ptr());
        }
    }

    #[test]
    fn signal_and_broadcast_without_waiters_are_no_ops() {
        let mut condvar = MaybeUninit::<Condvar>::uninit();

        unsafe {
            __pt_sys_sync__condvar_init(condvar.as_mut_ptr());
            __pt_sys_sync__condvar_signal(condvar.as_mut_ptr());
            __pt_sys_sync__condvar_broadcast(condvar.as_mut_ptr());
        }
    }
}
