use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::coords::Size;

use super::{Asset, ResourceError};

/// Process-unique texture identity, used by render backends to key GPU uploads.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(u64);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Decoded RGBA8 image, not yet uploaded to the GPU.
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    image: RgbaImage,
}

impl Texture {
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            id: TextureId::next(),
            image,
        }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn size(&self) -> Size {
        let (w, h) = self.image.dimensions();
        Size::new(w, h)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Tightly packed RGBA8 rows, top row first.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }
}

impl Asset for Texture {
    fn decode(name: &str, bytes: &[u8]) -> Result<Self, ResourceError> {
        let image = image::load_from_memory(bytes).map_err(|e| ResourceError::Decode {
            name: name.to_string(),
            source: Box::new(e),
        })?;
        Ok(Texture::from_image(image.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let tex = Texture::decode("wall", &png_bytes(4, 2)).unwrap();
        assert_eq!(tex.size(), Size::new(4, 2));
        assert_eq!(tex.pixels().len(), 4 * 2 * 4);
        assert_eq!(&tex.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = Texture::decode("wall", b"not an image").unwrap_err();
        assert!(matches!(err, ResourceError::Decode { ref name, .. } if name == "wall"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Texture::from_image(RgbaImage::new(1, 1));
        let b = Texture::from_image(RgbaImage::new(1, 1));
        assert_ne!(a.id(), b.id());
    }
}
