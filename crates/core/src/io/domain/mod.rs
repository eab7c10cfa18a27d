pub mod picture_reader;
pub mod picture_writer;
