//! Texture data and device-backed textures.

use std::{fmt, io::Read, path::Path, sync::Arc};

use crate::{
    device::{DeviceHandle, TextureDevice},
    error::{AssetError, AssetResult},
    source::SourceFs,
    tga,
};

/// Decoded pixels in CPU memory before upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Channel layout of [`TextureData::data`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    pub fn from_bits_per_pixel(bpp: u8) -> Option<Self> {
        match bpp {
            24 => Some(TextureFormat::Rgb8),
            32 => Some(TextureFormat::Rgba8),
            _ => None,
        }
    }

    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    #[inline]
    pub fn bits_per_pixel(self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }
}

impl TextureData {
    /// Wrap a pixel buffer, checking its length against the dimensions.
    pub fn new(width: u32, height: u32, format: TextureFormat, data: Vec<u8>) -> AssetResult<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(AssetError::TruncatedImagePayload {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Decode a TGA file.
    pub fn load_tga(fs: &dyn SourceFs, path: &Path) -> AssetResult<Self> {
        log::info!("Loading texture from {:?}", path);
        let mut bytes = Vec::new();
        fs.open(path)
            .and_then(|mut reader| reader.read_to_end(&mut bytes))
            .map_err(|e| AssetError::unreadable(path, e))?;
        let data = tga::decode_bytes(&bytes)?;
        log::info!(
            "Loaded texture {}x{} ({:?}) with {} bytes",
            data.width,
            data.height,
            data.format,
            data.data.len()
        );
        Ok(data)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected = self.width as usize * self.height as usize * self.bytes_per_pixel();
        self.data.len() == expected && self.width > 0 && self.height > 0
    }
}

/// A decoded texture that holds a device resource.
///
/// Owned by exactly one material slot. Dropping it releases the device
/// handle once.
pub struct Texture {
    data: TextureData,
    handle: DeviceHandle,
    device: Arc<dyn TextureDevice>,
}

impl Texture {
    /// Upload `data` to `device`.
    pub fn upload(device: &Arc<dyn TextureDevice>, data: TextureData) -> AssetResult<Self> {
        let handle = device.create_texture(&data)?;
        Ok(Self {
            data,
            handle,
            device: Arc::clone(device),
        })
    }

    /// Decode a TGA file and upload it.
    pub fn load(
        fs: &dyn SourceFs,
        device: &Arc<dyn TextureDevice>,
        path: &Path,
    ) -> AssetResult<Self> {
        Self::upload(device, TextureData::load_tga(fs, path)?)
    }

    pub fn data(&self) -> &TextureData {
        &self.data
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.data.width
    }

    pub fn height(&self) -> u32 {
        self.data.height
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.data.format.bits_per_pixel()
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("handle", &self.handle)
            .field("width", &self.data.width)
            .field("height", &self.data.height)
            .field("format", &self.data.format)
            .finish()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.device.destroy_texture(self.handle);
    }
}
