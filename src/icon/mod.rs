use std::path::{Path, PathBuf};

use tracing::{info, instrument, Span};

use crate::{data::AssetStore, error::Result};

pub use img::{center, place, Centered, Placement};
pub use options::{CenterOptions, ConfigError, Padding, TargetSize};
pub use pixels::{BoundingBox, RgbaImageExt};

mod img;
mod options;
mod pixels;

/// Result of centering one file.
#[derive(PartialEq, Eq, Debug, Clone)]
#[must_use]
pub enum CenterOutcome {
    Written { path: PathBuf, placement: Placement },
    /// Source had no visible pixels, nothing was written.
    Empty,
}

/// Center the icon at `input` and write it to `output` in the same format.
#[instrument(skip(store, options), fields(format))]
pub fn center_file(
    store: &AssetStore,
    input: &Path,
    output: &Path,
    options: &CenterOptions,
) -> Result<CenterOutcome> {
    let (source, format) = store.load(input)?;
    Span::current().record("format", format!("{:?}", format));

    let Some(centered) = center(&source, options) else {
        info!("Image is empty or transparent");
        return Ok(CenterOutcome::Empty);
    };
    store.save(output, &centered.image, format)?;
    info!(placement = ?centered.placement, "Centered icon saved to {}", output.display());
    Ok(CenterOutcome::Written {
        path: output.to_path_buf(),
        placement: centered.placement,
    })
}
