use std::fmt;

use image::{Rgba, RgbaImage};
use itertools::Itertools;
use serde::Serialize;

use crate::icon::{BoundingBox, RgbaImageExt};

pub const DEFAULT_SUBJECT: &str = "splash-icon.png";

/// Size, center pixel and visible bounds of an image.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct ImageReport {
    pub width: u32,
    pub height: u32,
    pub center: [u8; 4],
    pub bbox: Option<BoundingBox>,
}

impl ImageReport {
    pub fn of(img: &RgbaImage) -> ImageReport {
        let (width, height) = img.dimensions();
        let center = if width == 0 || height == 0 {
            [0; 4]
        } else {
            img.get_pixel(width / 2, height / 2).0
        };
        ImageReport {
            width,
            height,
            center,
            bbox: img.bbox(),
        }
    }
}

impl fmt::Display for ImageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Size: ({}, {})", self.width, self.height)?;
        writeln!(f, "Center Pixel: {}", tuple(&self.center))?;
        match &self.bbox {
            Some(b) => write!(
                f,
                "Bounding Box: ({}, {}, {}, {})",
                b.left, b.top, b.right, b.bottom
            ),
            None => write!(f, "Bounding Box: None"),
        }
    }
}

/// Color statistics over the visible pixels of an image.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct ColorReport {
    pub visible: u64,
    pub average: Option<[u8; 3]>,
    pub first_visible: Option<[u8; 4]>,
}

impl ColorReport {
    pub fn of(img: &RgbaImage) -> ColorReport {
        let mut first_visible = None;
        let mut sums = [0u64; 3];
        let mut visible = 0u64;
        for (_, _, Rgba(px)) in img.visible_pixels() {
            first_visible.get_or_insert(*px);
            for (sum, channel) in sums.iter_mut().zip(px) {
                *sum += u64::from(*channel);
            }
            visible += 1;
        }
        let average = (visible > 0).then(|| sums.map(|sum| (sum / visible) as u8));
        ColorReport {
            visible,
            average,
            first_visible,
        }
    }
}

impl fmt::Display for ColorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.average, &self.first_visible) {
            (Some(average), Some(first)) => {
                writeln!(f, "Average Visible Color: {}", tuple(average))?;
                write!(f, "First Visible Pixel: {}", tuple(first))
            }
            _ => write!(f, "Image is fully transparent!"),
        }
    }
}

fn tuple(channels: &[u8]) -> String {
    format!("({})", channels.iter().join(", "))
}
