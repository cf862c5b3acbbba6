use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use crate::error::{PlanError, Result};

/// The page's single "Download PDF" action. Disabled while a generation is
/// in flight and re-enabled when it settles, whatever the outcome.
#[derive(Debug, Default)]
pub struct DownloadAction {
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped, including on early return.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DownloadAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }

    /// Run `generate`. A second call while one is running is refused with
    /// `GenerationInProgress` and does not start another generation.
    pub async fn run<F, T>(&self, generate: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(PlanError::GenerationInProgress);
        }
        let _guard = InFlight(&self.in_flight);

        let result = generate.await;
        if let Err(e) = &result {
            error!("document generation failed: {}", e);
        }
        result
    }
}

/// Write `bytes` to `path`, creating missing parent directories.
pub async fn save_document(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    info!(path = %path.display(), bytes = bytes.len(), "saved document");
    Ok(())
}
