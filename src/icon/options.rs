use std::{fmt, str::FromStr};

use thiserror::Error;

pub const DEFAULT_SIZE: u32 = 1024;
pub const DEFAULT_PADDING: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("padding must be a finite number in [0, 0.5), got {0}")]
    InvalidPadding(f64),
    #[error("padding {0:?} is not a number")]
    UnparsablePadding(String),
    #[error("invalid target size {0:?}, expected WIDTHxHEIGHT with both sides > 0")]
    InvalidSize(String),
    #[error("padding {padding} leaves no room for content on a {width}px wide canvas")]
    NoContentArea { width: u32, padding: f64 },
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidSize(format!("{width}x{height}")));
        }
        Ok(TargetSize { width, height })
    }

    pub fn square(side: u32) -> Result<Self, ConfigError> {
        Self::new(side, side)
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        TargetSize {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

impl FromStr for TargetSize {
    type Err = ConfigError;

    /// Accepts `1024x768` or a single `1024` for a square canvas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidSize(s.to_string());
        let side = |v: &str| v.trim().parse::<u32>().map_err(|_| invalid());
        let size = match s.split_once(['x', 'X']) {
            Some((w, h)) => Self::new(side(w)?, side(h)?),
            None => Self::square(side(s)?),
        };
        size.map_err(|_| invalid())
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fraction of each canvas edge kept empty, always in `[0, 0.5)`.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Padding(f64);

impl Padding {
    pub fn new(fraction: f64) -> Result<Self, ConfigError> {
        if !fraction.is_finite() || !(0.0..0.5).contains(&fraction) {
            return Err(ConfigError::InvalidPadding(fraction));
        }
        Ok(Padding(fraction))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }
}

impl Default for Padding {
    fn default() -> Self {
        Padding(DEFAULT_PADDING)
    }
}

impl FromStr for Padding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fraction = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::UnparsablePadding(s.to_string()))?;
        Padding::new(fraction)
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CenterOptions {
    size: TargetSize,
    padding: Padding,
}

impl CenterOptions {
    pub fn new(size: TargetSize, padding: Padding) -> Result<Self, ConfigError> {
        let options = CenterOptions { size, padding };
        if options.content_dim() == 0 {
            return Err(ConfigError::NoContentArea {
                width: size.width,
                padding: padding.fraction(),
            });
        }
        Ok(options)
    }

    pub fn size(&self) -> TargetSize {
        self.size
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Side length the larger content dimension is scaled to.
    pub fn content_dim(&self) -> u32 {
        (f64::from(self.size.width) * (1.0 - 2.0 * self.padding.fraction())) as u32
    }
}

impl Default for CenterOptions {
    fn default() -> Self {
        CenterOptions {
            size: TargetSize::default(),
            padding: Padding::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(
            "1024x768".parse::<TargetSize>().unwrap(),
            TargetSize::new(1024, 768).unwrap()
        );
        assert_eq!(
            "512".parse::<TargetSize>().unwrap(),
            TargetSize::square(512).unwrap()
        );
        assert!("0x10".parse::<TargetSize>().is_err());
        assert!("wide".parse::<TargetSize>().is_err());
        assert!("10x".parse::<TargetSize>().is_err());
    }

    #[test]
    fn rejects_padding_out_of_range() {
        assert!(Padding::new(0.0).is_ok());
        assert!(Padding::new(0.49).is_ok());
        assert_eq!(Padding::new(0.5), Err(ConfigError::InvalidPadding(0.5)));
        assert_eq!(Padding::new(-0.1), Err(ConfigError::InvalidPadding(-0.1)));
        assert!(Padding::new(f64::NAN).is_err());
        assert!("0.7".parse::<Padding>().is_err());
        assert_eq!(
            "lots".parse::<Padding>(),
            Err(ConfigError::UnparsablePadding("lots".to_string()))
        );
    }

    #[test]
    fn default_content_dim() {
        assert_eq!(CenterOptions::default().content_dim(), 614);
    }

    #[test]
    fn rejects_options_without_content_area() {
        let size = TargetSize::square(1).unwrap();
        let padding = Padding::new(0.4).unwrap();
        assert!(matches!(
            CenterOptions::new(size, padding),
            Err(ConfigError::NoContentArea { width: 1, .. })
        ));
    }
}
