//! Opt-in timing hooks for path compilation.
//!
//! Timing is only collected when the `path_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable there). When
//! disabled, every call compiles to a plain closure invocation.
//!
//! ```ignore
//! let mut metrics = PathMetrics::default();
//! metrics.begin();
//! let built = metrics.time(TimingBucket::NodeBuild, || build_nodes(&waypoints, &config));
//! if let Some(report) = metrics.end() {
//!     println!("node build: {} ns", report.node_build_ns);
//! }
//! ```

/// Compilation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Waypoint to node conversion and corner smoothing.
    NodeBuild,
    /// Progress assignment.
    Progress,
    /// Normalized index construction.
    Index,
}

/// Cumulative nanoseconds per compilation phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathTimingReport {
    pub node_build_ns: u64,
    pub progress_ns: u64,
    pub index_ns: u64,
}

impl PathTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.node_build_ns
            .saturating_add(self.progress_ns)
            .saturating_add(self.index_ns)
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

#[derive(Debug, Default)]
pub struct PathMetrics {
    #[cfg(all(feature = "path_metrics", not(target_arch = "wasm32")))]
    report: PathTimingReport,
}

impl PathMetrics {
    pub fn begin(&mut self) {
        #[cfg(all(feature = "path_metrics", not(target_arch = "wasm32")))]
        {
            self.report = PathTimingReport::default();
        }
    }

    /// The accumulated report, or `None` when metrics are compiled out.
    #[must_use]
    pub fn end(&self) -> Option<PathTimingReport> {
        #[cfg(all(feature = "path_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "path_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "path_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = start.elapsed().as_nanos().min(u128::from(u64::MAX)) as u64;
            let slot = match bucket {
                TimingBucket::NodeBuild => &mut self.report.node_build_ns,
                TimingBucket::Progress => &mut self.report.progress_ns,
                TimingBucket::Index => &mut self.report.index_ns,
            };
            *slot = slot.saturating_add(nanos);
            result
        }

        #[cfg(not(all(feature = "path_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }
}
