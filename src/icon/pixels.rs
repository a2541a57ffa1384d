use image::{Rgba, RgbaImage};
use serde::Serialize;

/// Smallest rectangle holding every visible pixel. `right` and `bottom` are exclusive.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

pub trait RgbaImageExt {
    /// Pixels with alpha > 0, in row-major order.
    fn visible_pixels(&self) -> impl Iterator<Item = (u32, u32, &Rgba<u8>)>;

    fn bbox(&self) -> Option<BoundingBox>;
}

impl RgbaImageExt for RgbaImage {
    fn visible_pixels(&self) -> impl Iterator<Item = (u32, u32, &Rgba<u8>)> {
        self.enumerate_pixels().filter(|(_, _, px)| px[3] > 0)
    }

    fn bbox(&self) -> Option<BoundingBox> {
        self.visible_pixels().fold(None, |bbox, (x, y, _)| {
            Some(match bbox {
                None => BoundingBox {
                    left: x,
                    top: y,
                    right: x + 1,
                    bottom: y + 1,
                },
                Some(b) => BoundingBox {
                    left: b.left.min(x),
                    top: b.top.min(y),
                    right: b.right.max(x + 1),
                    bottom: b.bottom.max(y + 1),
                },
            })
        })
    }
}
