//! Cooperative cancellation
//!
//! Every `Cas` owns one token. Long-running operations receive it by
//! reference and poll it at their checkpoints; another thread requests the
//! abort through an [`AbortHandle`].

use crate::CasError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub(crate) struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle(&self) -> AbortHandle {
        AbortHandle {
            flag: Arc::clone(&self.flag),
        }
    }

    /// Fails with [`CasError::Aborted`] if an abort was requested.
    ///
    /// The request is consumed, so the next operation starts clean.
    pub(crate) fn checkpoint(&self) -> Result<(), CasError> {
        if self.flag.swap(false, Ordering::AcqRel) {
            tracing::debug!("abort request observed");
            return Err(CasError::Aborted);
        }
        Ok(())
    }
}

/// Thread-safe handle that aborts the operation currently running on the
/// `Cas` instance it was taken from.
#[derive(Debug, Clone)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_consumes_request() {
        let token = CancellationToken::new();
        assert!(token.checkpoint().is_ok());
        token.handle().abort();
        assert_eq!(token.checkpoint(), Err(CasError::Aborted));
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn test_abort_from_other_thread() {
        let token = CancellationToken::new();
        let handle = token.handle();
        std::thread::spawn(move || handle.abort()).join().unwrap();
        assert!(token.checkpoint().unwrap_err().is_aborted());
    }
}
