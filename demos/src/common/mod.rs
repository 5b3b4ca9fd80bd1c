//! Common utilities shared by the demo binaries.

pub mod backend;
pub mod logging;
pub mod stats;

pub use backend::{create_device, get_backend_name, SelectedBackend, SelectedDevice};
pub use logging::init_logging;
pub use stats::{mask_foreground_ratio, pixel_stats, PixelStats, StatisticsAccumulator};
