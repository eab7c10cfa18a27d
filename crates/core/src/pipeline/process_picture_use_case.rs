use std::path::Path;
use std::time::Instant;

use crate::io::domain::picture_reader::PictureReader;
use crate::io::domain::picture_writer::PictureWriter;
use crate::pipeline::benchmark_logger::BenchmarkLogger;
use crate::pipeline::process::PictureOperation;

/// Benchmark pipeline: read → (operate, timed) × iterations → write.
///
/// Every iteration starts from a fresh copy of the decoded input so repeated
/// runs measure the same work. The result of the last run is written out.
pub struct ProcessPictureUseCase {
    reader: Box<dyn PictureReader>,
    writer: Box<dyn PictureWriter>,
    operation: Box<dyn PictureOperation>,
    iterations: usize,
    logger: Box<dyn BenchmarkLogger>,
}

impl ProcessPictureUseCase {
    pub fn new(
        reader: Box<dyn PictureReader>,
        writer: Box<dyn PictureWriter>,
        operation: Box<dyn PictureOperation>,
        iterations: usize,
        logger: Box<dyn BenchmarkLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            operation,
            iterations: iterations.max(1),
            logger,
        }
    }

    /// Returns the duration of each run in milliseconds.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
        let original = self.reader.read(input_path)?;
        self.logger.info(&format!(
            "Loaded {} ({}x{})",
            input_path.display(),
            original.width(),
            original.height()
        ));

        let name = self.operation.name();
        let mut timings = Vec::with_capacity(self.iterations);
        let mut result = original.clone();

        for run in 0..self.iterations {
            let mut picture = original.clone();
            let start = Instant::now();
            self.operation.apply(&mut picture)?;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            log::debug!("{name} run {} took {elapsed_ms:.3}ms", run + 1);
            self.logger.run_finished(name, elapsed_ms);
            timings.push(elapsed_ms);
            result = picture;
        }

        self.writer.write(output_path, &result)?;
        self.logger.info(&format!("Saved {}", output_path.display()));
        self.logger.summary();

        Ok(timings)
    }
}
