use image::{
    imageops::{self, FilterType},
    Rgba, Rgba32FImage, RgbaImage,
};

use super::{options::CenterOptions, pixels::RgbaImageExt};

/// Where the scaled content sits on the canvas.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
#[must_use]
pub struct Centered {
    pub image: RgbaImage,
    pub placement: Placement,
}

/// Fit content of `width`x`height` into the padded area and center it.
pub fn place(width: u32, height: u32, options: &CenterOptions) -> Placement {
    let target = u64::from(options.content_dim());
    let (w, h) = (u64::from(width), u64::from(height));
    let large = w.max(h);
    // floor(side * target / large) in integers, the larger side lands on target exactly
    let fit = |side: u64| ((side * target / large) as u32).max(1);
    let (new_w, new_h) = (fit(w), fit(h));

    let size = options.size();
    Placement {
        x: (i64::from(size.width) - i64::from(new_w)).div_euclid(2),
        y: (i64::from(size.height) - i64::from(new_h)).div_euclid(2),
        width: new_w,
        height: new_h,
    }
}

/// Crop `source` to its visible content, scale it into the padded area and
/// paste it centered on a transparent canvas. `None` when nothing is visible.
pub fn center(source: &RgbaImage, options: &CenterOptions) -> Option<Centered> {
    let bbox = source.bbox()?;
    let content =
        imageops::crop_imm(source, bbox.left, bbox.top, bbox.width(), bbox.height()).to_image();
    let placement = place(bbox.width(), bbox.height(), options);
    // resample premultiplied so transparent pixels don't darken the edges
    let resized = imageops::resize(
        &premultiplied(&content),
        placement.width,
        placement.height,
        FilterType::Lanczos3,
    );
    let resized = unpremultiplied(&resized);

    let size = options.size();
    let mut canvas = RgbaImage::new(size.width, size.height);
    imageops::overlay(&mut canvas, &resized, placement.x, placement.y);
    Some(Centered {
        image: canvas,
        placement,
    })
}

fn premultiplied(img: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    })
}

fn unpremultiplied(img: &Rgba32FImage) -> RgbaImage {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        match to_u8(a) {
            0 => Rgba([0; 4]),
            alpha => Rgba([to_u8(r / a), to_u8(g / a), to_u8(b / a), alpha]),
        }
    })
}
