use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use blur_bench_core::blurring::domain::strategy_config::StrategyConfig;
use blur_bench_core::io::infrastructure::image_file_reader::ImageFileReader;
use blur_bench_core::io::infrastructure::image_file_writer::ImageFileWriter;
use blur_bench_core::pipeline::benchmark_logger::StdoutBenchmarkLogger;
use blur_bench_core::pipeline::process::Process;
use blur_bench_core::pipeline::process_picture_use_case::ProcessPictureUseCase;
use blur_bench_core::shared::constants::{IMAGE_EXTENSIONS, IO_ERROR_EXIT_CODE};

/// Times sequential and parallel box-blur strategies on an image file.
#[derive(Parser)]
#[command(name = "blur-bench")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file (format follows the extension).
    output: PathBuf,

    /// Process to run, e.g. blur_picture or parallel_row_blur.
    process: String,

    /// Extra argument: rotation angle for rotate_picture, H or V for flip_picture.
    argument: Option<String>,

    /// Number of timed runs; each starts from the original input.
    #[arg(long, default_value = "1")]
    iterations: usize,

    /// Use this many workers for every parallel strategy.
    #[arg(long)]
    workers: Option<usize>,

    /// Pool size for parallel_blur_picture.
    #[arg(long)]
    pixel_workers: Option<usize>,

    /// Size row and column pools to one worker per unit.
    #[arg(long, conflicts_with = "workers")]
    max_effort: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("[!] {e}");
        process::exit(IO_ERROR_EXIT_CODE);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let process = Process::parse(&cli.process, cli.argument.as_deref())?;
    let config = build_config(&cli);
    log::info!("Running {} x{} with {config:?}", process.name(), cli.iterations);

    let mut use_case = ProcessPictureUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        process.into_operation(&config),
        cli.iterations,
        Box::new(StdoutBenchmarkLogger::new()),
    );
    let timings = use_case.execute(&cli.input, &cli.output)?;

    if timings.len() > 1 {
        let average = timings.iter().sum::<f64>() / timings.len() as f64;
        println!(
            "-- Average over {} runs of {}: {average:.0} milliseconds",
            timings.len(),
            process.name()
        );
    }
    log::info!("Output written to {}", cli.output.display());
    Ok(())
}

fn build_config(cli: &Cli) -> StrategyConfig {
    let config = match cli.workers {
        Some(n) => StrategyConfig::uniform(n),
        None if cli.max_effort => StrategyConfig::max_effort(),
        None => StrategyConfig::default(),
    };
    match cli.pixel_workers {
        Some(n) => config.with_pixel_workers(n),
        None => config,
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Input must be an image ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.input.display()
        )
        .into());
    }
    if !is_image(&cli.output) {
        return Err(format!(
            "Output must be an image ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.output.display()
        )
        .into());
    }
    if cli.iterations == 0 {
        return Err("Iterations must be at least 1".into());
    }
    if cli.workers == Some(0) {
        return Err("Workers must be at least 1".into());
    }
    if cli.pixel_workers == Some(0) {
        return Err("Pixel workers must be at least 1".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
