use data::AssetStore;
use icon::{center_file, CenterOptions, CenterOutcome};
use tracing::instrument;
use util::run_or_log;

pub mod data;
pub mod error;
pub mod icon;
pub mod inspect;
mod util;

pub use error::{IconError, Result};

pub const ICON: &str = "icon.png";
pub const ADAPTIVE_ICON: &str = "adaptive-icon.png";

/// Outcomes of the reference centering run, one per step, `None` where the step failed.
#[derive(Debug)]
#[must_use]
pub struct ReferenceRun {
    pub icon: Option<CenterOutcome>,
    pub adaptive_icon: Option<CenterOutcome>,
}

impl ReferenceRun {
    pub fn all_succeeded(&self) -> bool {
        self.icon.is_some() && self.adaptive_icon.is_some()
    }
}

/// Center `icon.png` onto itself, then derive `adaptive-icon.png` from it.
/// A failure in one step is logged and does not stop the other.
#[instrument(skip(options))]
pub fn center_reference_assets(store: &AssetStore, options: &CenterOptions) -> ReferenceRun {
    let icon = store.path(ICON);
    let adaptive = store.path(ADAPTIVE_ICON);
    ReferenceRun {
        icon: run_or_log(ICON, || center_file(store, &icon, &icon, options)),
        adaptive_icon: run_or_log(ADAPTIVE_ICON, || {
            center_file(store, &icon, &adaptive, options)
        }),
    }
}
