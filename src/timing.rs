//! Timing harness: average wall-clock time per call and speedup reports.
//!
//! Calls within one measurement run one after another on the same input.
//! Outputs are dropped after the clock stops.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::buffer::PixelBuffer;
use crate::config::{check_calls, TimingConfig};
use crate::error::FilterResult;
use crate::registry::{FilterName, FilterRegistry, Implementation, Kernel};

// ============================================================================
// Measurement
// ============================================================================

/// Average duration of one `call()`, in seconds, over `calls` runs.
///
/// Stops at the first error. `calls` must be at least 1.
pub fn time_one<F, T>(mut call: F, calls: usize) -> FilterResult<f64>
where
    F: FnMut() -> FilterResult<T>,
{
    check_calls(calls)?;

    let mut total = Duration::ZERO;
    for _ in 0..calls {
        let start = Instant::now();
        let output = call()?;
        total += start.elapsed();
        black_box(output);
    }

    Ok(total.as_secs_f64() / calls as f64)
}

/// Timing of one kernel on one input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingResult {
    pub filter: FilterName,
    pub implementation: Implementation,
    /// Mean seconds per call
    pub mean_seconds: f64,
    pub calls: usize,
    /// `reference_mean / mean_seconds`; `None` for the reference itself
    pub speedup: Option<f64>,
}

impl TimingResult {
    /// Attach the speedup relative to a reference mean.
    ///
    /// A candidate too fast for the clock to register gets an infinite speedup.
    pub fn with_speedup_over(mut self, reference_seconds: f64) -> Self {
        self.speedup = Some(if self.mean_seconds > 0.0 {
            reference_seconds / self.mean_seconds
        } else {
            f64::INFINITY
        });
        self
    }

    pub fn is_reference(&self) -> bool {
        self.speedup.is_none()
    }
}

impl fmt::Display for TimingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speedup {
            None => write!(
                f,
                "Reference ({}) filter time {}: {:.3}s (calls={})",
                self.implementation, self.filter, self.mean_seconds, self.calls
            ),
            Some(speedup) => write!(
                f,
                "Timing: {} {}: {:.6}s (speedup={:.2}x)",
                self.implementation, self.filter, self.mean_seconds, speedup
            ),
        }
    }
}

/// Time `repeat_count` calls of `kernel` on `input` with default parameters.
pub fn measure(
    kernel: &Kernel,
    input: &PixelBuffer,
    repeat_count: usize,
) -> FilterResult<TimingResult> {
    let mean_seconds = time_one(|| kernel.apply(input), repeat_count)?;

    debug!(
        filter = %kernel.filter(),
        implementation = %kernel.implementation(),
        calls = repeat_count,
        mean_seconds,
        "Measured kernel"
    );

    Ok(TimingResult {
        filter: kernel.filter(),
        implementation: kernel.implementation(),
        mean_seconds,
        calls: repeat_count,
        speedup: None,
    })
}

// ============================================================================
// Reports
// ============================================================================

/// All timings of one report run, grouped by filter, reference first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingReport {
    pub width: usize,
    pub height: usize,
    pub calls: usize,
    pub entries: Vec<TimingResult>,
}

impl TimingReport {
    pub fn get(&self, filter: FilterName, implementation: Implementation) -> Option<&TimingResult> {
        self.entries
            .iter()
            .find(|e| e.filter == filter && e.implementation == implementation)
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Timing performed using {}x{} image", self.width, self.height)?;
        writeln!(f)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Time every configured implementation of every configured filter.
///
/// For each filter the reference implementation is timed first; every
/// other implementation then gets a speedup relative to it. Pairs the
/// registry does not provide are skipped, and a filter without a
/// reference kernel is skipped entirely.
pub fn make_reports(
    registry: &FilterRegistry,
    input: &PixelBuffer,
    config: &TimingConfig,
) -> FilterResult<TimingReport> {
    config.validate()?;
    input.require_rgb()?;

    let (height, width, _) = input.dim();
    let span = info_span!("make_reports", width, height, calls = config.calls);
    let _enter = span.enter();

    let mut entries = Vec::new();

    for &filter in &config.filters {
        let Some(reference) = registry.get(filter, Implementation::REFERENCE) else {
            debug!(%filter, "No reference kernel, skipping filter");
            continue;
        };

        let reference_result = measure(&reference, input, config.calls)?;
        let reference_seconds = reference_result.mean_seconds;
        info!(%filter, mean_seconds = reference_seconds, "Reference timed");
        entries.push(reference_result);

        for &implementation in &config.implementations {
            if implementation == Implementation::REFERENCE {
                continue;
            }
            let Some(kernel) = registry.get(filter, implementation) else {
                debug!(%filter, %implementation, "Not registered, skipping");
                continue;
            };

            let result = measure(&kernel, input, config.calls)?.with_speedup_over(reference_seconds);
            info!(
                %filter,
                %implementation,
                mean_seconds = result.mean_seconds,
                speedup = result.speedup.unwrap_or_default(),
                "Implementation timed"
            );
            entries.push(result);
        }
    }

    Ok(TimingReport {
        width,
        height,
        calls: config.calls,
        entries,
    })
}
