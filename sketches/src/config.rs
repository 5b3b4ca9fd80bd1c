use std::path::PathBuf;

use burn::prelude::*;

use crate::{pairing::PairingMode, split::Split};

/// How a [`SketchesDataset`](crate::SketchesDataset) is built.
#[derive(Config, Debug)]
pub struct SketchesConfig {
    /// Directory containing `unprocessed/` and `processed/`.
    pub root: PathBuf,
    #[config(default = "Split::Train")]
    pub split: Split,
    #[config(default = "PairingMode::Lazy")]
    pub pairing: PairingMode,
    /// Order pairs by stem instead of directory enumeration order.
    #[config(default = "false")]
    pub sort: bool,
}
