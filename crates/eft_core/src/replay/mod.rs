pub mod io;
pub mod types;

pub use io::*;
pub use types::*;
