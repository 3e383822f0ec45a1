//! Parallel sampling for large subinterval counts.
//!
//! Samples are evaluated on the rayon pool but folded sequentially in node
//! order, so the estimate is bit-identical to [`QuadratureRequest::integrate`]
//! and a failure reports the lowest failing node.

use log::trace;
use rayon::prelude::*;

use super::{Integrand, IntegrationError, QuadratureRequest};

/// Configuration for parallel integration.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum number of samples to enable parallelism.
    pub parallel_threshold: usize,
    /// Minimum number of samples handed to one rayon task.
    pub min_chunk_len: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 4096,
            min_chunk_len: 1024,
        }
    }
}

impl QuadratureRequest {
    /// Integrates `f`, evaluating the samples in parallel.
    ///
    /// Unlike the sequential path every sample is evaluated even when an
    /// earlier one fails.
    pub fn integrate_parallel<F>(&self, f: &F, config: &ParallelConfig) -> Result<f64, IntegrationError>
    where
        F: Integrand + Sync + ?Sized,
    {
        let count = self.sample_count();
        if count < config.parallel_threshold {
            trace!(
                "{} samples below parallel threshold {}, sampling sequentially",
                count, config.parallel_threshold
            );
            return self.integrate(f);
        }

        let samples: Vec<Result<f64, IntegrationError>> = (0..count)
            .into_par_iter()
            .with_min_len(config.min_chunk_len.max(1))
            .map(|i| self.sample(f, i))
            .collect();

        self.reduce(samples)
    }
}
