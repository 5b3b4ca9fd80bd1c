//! Sketches Demos
//!
//! Command-line tools built on `sketches-burn`.
//!
//! ## Available Binaries
//!
//! - `dataset_test`: Load a sketch/mask dataset, inspect samples and batches
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin dataset_test -- --dataset-path datasets/sketches
//! ```

pub mod common;
pub mod config;

pub use common::{create_device, get_backend_name, init_logging, SelectedBackend, SelectedDevice};
pub use config::DatasetTestConfig;
