//! File encoders for the kernel outputs

pub mod obj;
pub mod png;

pub use obj::save_obj;
pub use png::save_png;
