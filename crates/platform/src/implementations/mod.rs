//! Host implementations of the platform traits

mod process;

pub use process::NativeProcessOperations;
