use std::collections::BTreeMap;

/// Cross-cutting sink for benchmark events.
///
/// Keeps the use case free of output concerns so the CLI and tests can
/// observe runs differently.
pub trait BenchmarkLogger: Send {
    /// Record how long one run of a named process took.
    fn run_finished(&mut self, process: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-benchmark summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullBenchmarkLogger;

impl BenchmarkLogger for NullBenchmarkLogger {
    fn run_finished(&mut self, _process: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that prints each run and a per-process summary.
#[derive(Default)]
pub struct StdoutBenchmarkLogger {
    timings: BTreeMap<String, Vec<f64>>,
    messages: Vec<String>,
}

impl StdoutBenchmarkLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings_for(&self, process: &str) -> Option<&[f64]> {
        self.timings.get(process).map(|v| v.as_slice())
    }

    /// Mean run time for a process, `None` if it never ran.
    pub fn average_ms(&self, process: &str) -> Option<f64> {
        let runs = self.timings.get(process)?;
        if runs.is_empty() {
            return None;
        }
        Some(runs.iter().sum::<f64>() / runs.len() as f64)
    }

    /// Returns the formatted summary string, or `None` if nothing ran.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let mut lines = vec!["Benchmark summary:".to_string()];
        for (process, runs) in &self.timings {
            let total: f64 = runs.iter().sum();
            let min = runs.iter().copied().fold(f64::INFINITY, f64::min);
            let max = runs.iter().copied().fold(0.0, f64::max);
            let avg = total / runs.len().max(1) as f64;
            lines.push(format!(
                "  {process:24}: {} runs  avg {avg:8.1}ms  min {min:8.1}ms  max {max:8.1}ms",
                runs.len()
            ));
        }
        Some(lines.join("\n"))
    }
}

impl BenchmarkLogger for StdoutBenchmarkLogger {
    fn run_finished(&mut self, process: &str, duration_ms: f64) {
        self.timings
            .entry(process.to_string())
            .or_default()
            .push(duration_ms);
        println!("-- Picture has been processed by {process} in {duration_ms:.0} milliseconds");
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            println!("{text}");
        }
    }
}
