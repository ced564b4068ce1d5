pub mod config;
pub mod exports;
pub mod fusion;
pub mod graph;
pub mod imports;
pub mod multiplex;
pub mod partition;
pub mod progress_bar;

#[cfg(feature = "python-bindings")]
pub mod python_api;

#[cfg(test)]
pub mod test_helpers;
