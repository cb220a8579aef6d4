pub mod io;

pub use io::{atomic_write, sanitize_filename};
