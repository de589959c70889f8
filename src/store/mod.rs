pub mod padstore;

pub use padstore::*;
