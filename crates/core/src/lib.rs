pub mod blurring;
pub mod io;
pub mod pipeline;
pub mod pool;
pub mod shared;
pub mod transform;
