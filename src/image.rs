use crate::refs::{ObjectReferences, RefType};
use image::{ColorType, DynamicImage, ImageError, ImageFormat};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};
use std::path::Path;

/// Explicit format of an in-memory image
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Extension {
    Png,
    Jpg,
}

impl Extension {
    fn format(self) -> ImageFormat {
        match self {
            Extension::Png => ImageFormat::Png,
            Extension::Jpg => ImageFormat::Jpeg,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Extension::Png => "png",
            Extension::Jpg => "jpg",
        }
    }
}

/// What a canvas hands back after registering an image: the identifier the
/// image is drawn by, and its intrinsic size in pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    pub id: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl AssetHandle {
    pub fn new<S: ToString>(id: S, width: u32, height: u32) -> AssetHandle {
        AssetHandle {
            id: id.to_string(),
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width as f32
    }

    pub fn height(&self) -> f32 {
        self.height as f32
    }
}

enum RasterData {
    /// baseline RGB jpegs can be embedded as-is
    Jpeg(Vec<u8>),
    Decoded(DynamicImage),
}

/// A raster image, decoded (or validated) and ready to be embedded
pub struct Image {
    data: RasterData,
    pub width: u32,
    pub height: u32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Load an image from disk, guessing its format from its contents
    pub fn new_from_disk<P: AsRef<Path>>(path: P) -> Result<Image, ImageError> {
        let data = std::fs::read(path.as_ref()).map_err(ImageError::IoError)?;
        Self::new_from_bytes(data, None)
    }

    /// Load an image from memory. Without an explicit `extension` the format is
    /// guessed from the data.
    pub fn new_from_bytes(data: Vec<u8>, extension: Option<Extension>) -> Result<Image, ImageError> {
        let format = match extension {
            Some(extension) => extension.format(),
            None => image::guess_format(&data)?,
        };
        let image = image::load_from_memory_with_format(&data, format)?;
        let (width, height) = (image.width(), image.height());

        let data = match (format, image.color()) {
            (ImageFormat::Jpeg, ColorType::Rgb8) => RasterData::Jpeg(data),
            _ => RasterData::Decoded(image),
        };

        Ok(Image {
            data,
            width,
            height,
        })
    }

    fn encode(&self) -> EncodeOutput {
        match &self.data {
            RasterData::Jpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterData::Decoded(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes: compress_to_vec_zlib(image.to_rgb8().as_raw(), level),
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, image_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn png(width: u32, height: u32, alpha: bool) -> Vec<u8> {
        let image = if alpha {
            DynamicImage::new_rgba8(width, height)
        } else {
            DynamicImage::new_rgb8(width, height)
        };
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("can encode png");
        bytes
    }

    #[test]
    fn reads_dimensions_from_memory() {
        let image = Image::new_from_bytes(png(6, 3, false), Some(Extension::Png)).expect("valid png");
        assert_eq!((image.width, image.height), (6, 3));
        let guessed = Image::new_from_bytes(png(2, 9, false), None).expect("valid png");
        assert_eq!((guessed.width, guessed.height), (2, 9));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Image::new_from_bytes(b"not an image".to_vec(), Some(Extension::Png)).is_err());
        assert!(Image::new_from_bytes(Vec::new(), None).is_err());
    }

    #[test]
    fn alpha_channel_becomes_a_mask() {
        let image = Image::new_from_bytes(png(2, 2, true), None).expect("valid png");
        assert!(image.encode().mask.is_some());
        let image = Image::new_from_bytes(png(2, 2, false), None).expect("valid png");
        assert!(image.encode().mask.is_none());
    }
}
