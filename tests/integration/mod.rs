pub mod common;
pub mod runs;
