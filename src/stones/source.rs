// src/stones/source.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::ParseError;

/// Resolves a diagram `src` (as written in the page XML) to pixels.
pub trait ImageSource: Sync {
    fn load(&self, src: &str) -> Result<RgbImage, ParseError>;
}

/// pdftohtml writes `src` relative to the XML file's directory.
#[derive(Clone, Debug)]
pub struct DirImageSource {
    base: PathBuf,
}

impl DirImageSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Source for the images next to `xml_path`.
    pub fn beside(xml_path: &Path) -> Self {
        Self::new(xml_path.parent().unwrap_or_else(|| Path::new(".")))
    }
}

impl ImageSource for DirImageSource {
    fn load(&self, src: &str) -> Result<RgbImage, ParseError> {
        let path = self.base.join(src);
        let img = image::open(&path).map_err(|e| ParseError::Image {
            src: path.display().to_string(),
            source: e,
        })?;
        Ok(img.to_rgb8())
    }
}

/// Pre-rendered rasters keyed by `src`.
#[derive(Clone, Debug, Default)]
pub struct MemoryImages {
    images: HashMap<String, RgbImage>,
}

impl MemoryImages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, img: RgbImage) {
        self.images.insert(src.into(), img);
    }
}

impl ImageSource for MemoryImages {
    fn load(&self, src: &str) -> Result<RgbImage, ParseError> {
        self.images.get(src).cloned().ok_or_else(|| ParseError::Image {
            src: s!(src),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such in-memory image",
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_lookup() {
        let mut imgs = MemoryImages::new();
        imgs.insert("a.png", RgbImage::new(3, 2));
        assert_eq!(imgs.load("a.png").unwrap().dimensions(), (3, 2));
        assert!(matches!(imgs.load("b.png"), Err(ParseError::Image { .. })));
    }

    #[test]
    fn dir_source_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(4, 5, image::Rgb([255, 0, 0]))
            .save(dir.path().join("d.png"))
            .unwrap();
        let src = DirImageSource::beside(&dir.path().join("game.xml"));
        let img = src.load("d.png").unwrap();
        assert_eq!(img.dimensions(), (4, 5));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
        assert!(src.load("missing.png").is_err());
    }
}
