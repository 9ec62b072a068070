use linedict_common::{Result, error::Error};

/// Configuration parameters for [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderParams {
    /// Number of parallel workers, each encoding one contiguous line range.
    /// Must be in `1..=MAX_WORKER_COUNT`.
    pub worker_count: usize,

    /// Maximum number of lines a worker reads from the source at once.
    /// Bounds the memory held by a worker beyond its own symbols.
    pub batch_size: usize,
}

impl EncoderParams {
    /// Upper bound on `worker_count`, to keep the thread pool reasonable.
    pub const MAX_WORKER_COUNT: usize = 1024;

    pub const DEFAULT_BATCH_SIZE: usize = 64 * 1024;

    pub fn with_workers(worker_count: usize) -> EncoderParams {
        EncoderParams {
            worker_count,
            ..Default::default()
        }
    }

    /// Checks the parameters, failing with `InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(Error::invalid_config(
                "worker_count",
                "at least one worker is required",
            ));
        }
        if self.worker_count > Self::MAX_WORKER_COUNT {
            return Err(Error::invalid_config(
                "worker_count",
                format!(
                    "{} exceeds the maximum of {}",
                    self.worker_count,
                    Self::MAX_WORKER_COUNT
                ),
            ));
        }
        linedict_common::verify_arg!(batch_size, self.batch_size > 0);
        Ok(())
    }
}

impl Default for EncoderParams {
    /// One worker per available CPU.
    fn default() -> Self {
        let worker_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(Self::MAX_WORKER_COUNT);
        EncoderParams {
            worker_count,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EncoderParams;

    #[test]
    fn test_default_is_valid() {
        let params = EncoderParams::default();
        assert!(params.worker_count >= 1);
        params.validate().unwrap();
    }

    #[test]
    fn test_validate() {
        assert!(EncoderParams::with_workers(0).validate().unwrap_err().is_invalid_config());
        assert!(EncoderParams::with_workers(1).validate().is_ok());
        assert!(
            EncoderParams::with_workers(EncoderParams::MAX_WORKER_COUNT)
                .validate()
                .is_ok()
        );
        assert!(
            EncoderParams::with_workers(EncoderParams::MAX_WORKER_COUNT + 1)
                .validate()
                .is_err()
        );
        let params = EncoderParams {
            worker_count: 2,
            batch_size: 0,
        };
        assert!(params.validate().unwrap_err().is_invalid_config());
    }
}
