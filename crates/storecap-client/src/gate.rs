// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ClientError, ClientErrorCode};

/// Allows one submission in flight at a time.
#[derive(Debug, Default)]
pub struct SubmitGate {
    busy: AtomicBool,
}

/// Held for the duration of a submission; releases the gate on drop.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    gate: &'a SubmitGate,
}

impl SubmitGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn try_acquire(&self) -> Result<SubmitPermit<'_>, ClientError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| SubmitPermit { gate: self })
            .map_err(|_| {
                ClientError::new(ClientErrorCode::Busy, "a submission is already in flight")
            })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_permit_drops() {
        let gate = SubmitGate::new();
        let permit = gate.try_acquire().expect("first permit");
        assert!(gate.is_busy());
        let err = gate.try_acquire().expect_err("second permit");
        assert_eq!(err.code, ClientErrorCode::Busy);
        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }
}
