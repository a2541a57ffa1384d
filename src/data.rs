use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::{debug, warn};

use crate::error::{IconError, Result};

pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Image files living under one assets directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    base_path: PathBuf,
}

impl AssetStore {
    pub fn new(path: &Path) -> AssetStore {
        AssetStore {
            base_path: PathBuf::from(path),
        }
    }

    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.base_path.join(name)
    }

    /// Decode an image, sniffing the format from its content, as RGBA8.
    pub fn load(&self, path: &Path) -> Result<(RgbaImage, ImageFormat)> {
        let open_err = |source| IconError::Open {
            path: path.to_path_buf(),
            source,
        };
        let reader = ImageReader::open(path)
            .map_err(open_err)?
            .with_guessed_format()
            .map_err(open_err)?;
        let Some(format) = reader.format() else {
            return Err(IconError::UnknownFormat {
                path: path.to_path_buf(),
            });
        };
        let img = reader.decode().map_err(|source| IconError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?format, width = img.width(), height = img.height(), "Loaded image");
        Ok((img.to_rgba8(), format))
    }

    /// Encode `img` and move it into place, leaving `path` untouched on failure.
    pub fn save(&self, path: &Path, img: &RgbaImage, format: ImageFormat) -> Result<()> {
        let mut buf = Cursor::new(Vec::with_capacity(2_usize.pow(19))); // 512KB
        img.write_to(&mut buf, format)
            .map_err(|source| IconError::Encode {
                path: path.to_path_buf(),
                source,
            })?;

        let staging = staging_path(path);
        let write_err = |source| IconError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Err(err) = fs::write(&staging, buf.get_ref()) {
            discard(&staging);
            return Err(write_err(err));
        }
        if let Err(err) = fs::rename(&staging, path) {
            discard(&staging);
            return Err(write_err(err));
        }
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn discard(staging: &Path) {
    if let Err(err) = fs::remove_file(staging) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(error = "Could not remove staging file", path = %staging.display(), err = err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("iconkit-data-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn saves_and_loads_png() {
        let dir = scratch_dir("roundtrip");
        let store = AssetStore::new(&dir);
        let img = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]));
        let path = store.path("icon.png");
        store.save(&path, &img, ImageFormat::Png).unwrap();

        let (loaded, format) = store.load(&path).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(loaded, img);
        let leftovers: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn sniffs_format_from_content() {
        let dir = scratch_dir("sniff");
        let store = AssetStore::new(&dir);
        let path = store.path("icon.bin");
        let img = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        store.save(&path, &img, ImageFormat::Png).unwrap();
        let (_, format) = store.load(&path).unwrap();
        assert_eq!(format, ImageFormat::Png);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn reports_unknown_format_and_missing_file() {
        let dir = scratch_dir("errors");
        let store = AssetStore::new(&dir);
        let garbage = store.path("garbage.dat");
        fs::write(&garbage, b"definitely not an image").unwrap();
        assert!(matches!(
            store.load(&garbage),
            Err(IconError::UnknownFormat { .. })
        ));
        let corrupt = store.path("corrupt.png");
        fs::write(&corrupt, b"\x89PNG\r\n\x1a\ntruncated").unwrap();
        assert!(matches!(
            store.load(&corrupt),
            Err(IconError::Decode { .. })
        ));
        assert!(matches!(
            store.load(&store.path("missing.png")),
            Err(IconError::Open { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let dir = scratch_dir("nowrite");
        let store = AssetStore::new(&dir);
        let path = store.path("no-such-dir").join("icon.png");
        let img = RgbaImage::new(2, 2);
        assert!(matches!(
            store.save(&path, &img, ImageFormat::Png),
            Err(IconError::Write { .. })
        ));
        assert!(!path.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
