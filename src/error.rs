//! Error type for the fallible edges of the library.
//!
//! Drawing itself never fails. Errors come from creating a surface without
//! pixels, from parsing control values (colors, mode and pattern names), and
//! from exporting the surface.

use std::fmt;

#[derive(Debug)]
pub enum CanvasError {
    /// A surface with a zero dimension has nothing to draw on.
    EmptySurface { width: u32, height: u32 },
    InvalidColor(String),
    UnknownPattern(String),
    UnknownMode(String),
    Encode(image::ImageError),
    Io(std::io::Error),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::EmptySurface { width, height } => {
                write!(f, "surface has no pixels ({}x{})", width, height)
            }
            CanvasError::InvalidColor(s) => write!(f, "invalid color '{}'", s),
            CanvasError::UnknownPattern(s) => write!(f, "unknown pattern '{}'", s),
            CanvasError::UnknownMode(s) => write!(f, "unknown brush mode '{}'", s),
            CanvasError::Encode(e) => write!(f, "image encoding failed: {}", e),
            CanvasError::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CanvasError::Encode(e) => Some(e),
            CanvasError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for CanvasError {
    fn from(e: image::ImageError) -> Self {
        CanvasError::Encode(e)
    }
}

impl From<std::io::Error> for CanvasError {
    fn from(e: std::io::Error) -> Self {
        CanvasError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = CanvasError::EmptySurface {
            width: 0,
            height: 600,
        };
        assert_eq!(e.to_string(), "surface has no pixels (0x600)");
        assert_eq!(
            CanvasError::UnknownPattern("spiral".into()).to_string(),
            "unknown pattern 'spiral'"
        );
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let e = CanvasError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(e.source().is_some());
        assert!(CanvasError::InvalidColor("x".into()).source().is_none());
    }
}
