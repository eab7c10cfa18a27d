pub mod constants;
pub mod picture;
pub mod pixel;
