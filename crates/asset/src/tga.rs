//! Uncompressed truecolor TGA decoding.
//!
//! Only image type 2 at 24 or 32 bits per pixel is accepted. Pixels are
//! stored blue-first on disk and come out red-first.

use crate::{
    error::{AssetError, AssetResult},
    texture::{TextureData, TextureFormat},
};

pub const HEADER_LEN: usize = 18;

/// Uncompressed truecolor.
pub const TYPE_TRUECOLOR: u8 = 2;

/// The fixed 18-byte file header. Multi-byte fields are little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_spec: [u8; 5],
    pub x_origin: i16,
    pub y_origin: i16,
    pub width: i16,
    pub height: i16,
    pub pixel_depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    pub fn parse(bytes: &[u8]) -> AssetResult<Self> {
        let b: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(AssetError::TruncatedImageHeader {
                actual: bytes.len(),
            })?;
        let i16_at = |i: usize| i16::from_le_bytes([b[i], b[i + 1]]);
        Ok(Self {
            id_length: b[0],
            color_map_type: b[1],
            image_type: b[2],
            color_map_spec: [b[3], b[4], b[5], b[6], b[7]],
            x_origin: i16_at(8),
            y_origin: i16_at(10),
            width: i16_at(12),
            height: i16_at(14),
            pixel_depth: b[16],
            descriptor: b[17],
        })
    }

    /// Bytes of colour-map data between the image id and the pixels.
    fn color_map_len(&self) -> usize {
        if self.color_map_type == 0 {
            return 0;
        }
        let spec = self.color_map_spec;
        let entries = u16::from_le_bytes([spec[2], spec[3]]) as usize;
        entries * (spec[4] as usize).div_ceil(8)
    }

    /// Check the header describes something we can decode.
    pub fn validate(&self) -> AssetResult<TextureFormat> {
        if self.image_type != TYPE_TRUECOLOR {
            return Err(AssetError::UnsupportedImageFormat(format!(
                "image type {} (only uncompressed truecolor is supported)",
                self.image_type
            )));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(AssetError::UnsupportedImageFormat(format!(
                "invalid dimensions {}x{}",
                self.width, self.height
            )));
        }
        TextureFormat::from_bits_per_pixel(self.pixel_depth).ok_or_else(|| {
            AssetError::UnsupportedImageFormat(format!("{} bits per pixel", self.pixel_depth))
        })
    }
}

/// Decode a complete TGA file held in memory.
pub fn decode_bytes(bytes: &[u8]) -> AssetResult<TextureData> {
    let header = TgaHeader::parse(bytes)?;
    let format = header.validate()?;

    let width = header.width as u32;
    let height = header.height as u32;
    let expected = width as usize * height as usize * format.bytes_per_pixel();

    let start = HEADER_LEN + header.id_length as usize + header.color_map_len();
    let payload = bytes.get(start..).unwrap_or(&[]);
    if payload.len() < expected {
        return Err(AssetError::TruncatedImagePayload {
            expected,
            actual: payload.len(),
        });
    }

    let mut pixels = payload[..expected].to_vec();
    for px in pixels.chunks_exact_mut(format.bytes_per_pixel()) {
        px.swap(0, 2);
    }

    TextureData::new(width, height, format, pixels)
}

/// Encode an uncompressed truecolor TGA (bottom-left origin).
///
/// The inverse of [`decode_bytes`]; used to produce fixtures.
pub fn encode(data: &TextureData) -> Vec<u8> {
    let bpp = data.format.bytes_per_pixel();
    let mut out = Vec::with_capacity(HEADER_LEN + data.data.len());
    out.extend_from_slice(&[0, 0, TYPE_TRUECOLOR, 0, 0, 0, 0, 0]);
    out.extend_from_slice(&0i16.to_le_bytes());
    out.extend_from_slice(&0i16.to_le_bytes());
    out.extend_from_slice(&(data.width as i16).to_le_bytes());
    out.extend_from_slice(&(data.height as i16).to_le_bytes());
    out.push(data.format.bits_per_pixel() as u8);
    out.push(if bpp == 4 { 8 } else { 0 });
    for px in data.data.chunks_exact(bpp) {
        out.extend_from_slice(&[px[2], px[1], px[0]]);
        if bpp == 4 {
            out.push(px[3]);
        }
    }
    out
}
