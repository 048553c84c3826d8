//! Metric names and recording helpers for the pipeline.
//!
//! Everything goes through the `metrics` facade; whoever embeds the pipeline decides whether a
//! recorder (and exporter) is installed. Without one, recording is a no-op.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    PipelineRuns,
    PhaseOutcomes,
    PhaseDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PipelineRuns => "toolkit_pipeline_runs_total",
            MetricName::PhaseOutcomes => "toolkit_phase_outcomes_total",
            MetricName::PhaseDuration => "toolkit_phase_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn pipeline_run() {
    ::metrics::counter!(MetricName::PipelineRuns.as_str()).increment(1);
}

/// Per-phase outcome counters and timings
pub mod phases {
    use super::MetricName;

    pub fn outcome(phase: &'static str, outcome: &'static str) {
        ::metrics::counter!(MetricName::PhaseOutcomes.as_str(), "phase" => phase, "outcome" => outcome)
            .increment(1);
    }

    pub fn duration(phase: &'static str, secs: f64) {
        ::metrics::histogram!(MetricName::PhaseDuration.as_str(), "phase" => phase).record(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_follow_prometheus_conventions() {
        for name in [MetricName::PipelineRuns, MetricName::PhaseOutcomes, MetricName::PhaseDuration] {
            assert!(name.as_str().starts_with("toolkit_"));
            assert_eq!(name.to_string(), name.as_str());
        }
        assert!(MetricName::PhaseOutcomes.as_str().ends_with("_total"));
        assert!(MetricName::PhaseDuration.as_str().ends_with("_seconds"));
    }

    #[test]
    fn test_recording_without_recorder_is_a_noop() {
        pipeline_run();
        phases::outcome("scrape", "exported");
        phases::duration("scrape", 0.5);
    }
}
