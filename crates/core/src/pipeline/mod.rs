pub mod benchmark_logger;
pub mod process;
pub mod process_picture_use_case;
