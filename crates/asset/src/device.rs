//! Upload seam between decoded textures and a graphics device.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::{
    error::{AssetError, AssetResult},
    texture::TextureData,
};

/// Opaque id of a device-side texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u32);

/// Graphics-device texture allocator.
///
/// Every handle returned by `create_texture` is passed to
/// `destroy_texture` exactly once, when the owning [`crate::Texture`] drops.
pub trait TextureDevice: Send + Sync {
    fn create_texture(&self, data: &TextureData) -> AssetResult<DeviceHandle>;
    fn destroy_texture(&self, handle: DeviceHandle);
}

/// Device without a GPU: hands out sequential handles and tracks which are alive.
#[derive(Debug)]
pub struct HeadlessDevice {
    next: AtomicU32,
    created: AtomicUsize,
    destroyed: AtomicUsize,
    live: Mutex<Vec<DeviceHandle>>,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
            created: AtomicUsize::new(0),
            destroyed: AtomicUsize::new(0),
            live: Mutex::new(Vec::new()),
        }
    }

    /// Number of handles created and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.live.lock().len()
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn destroyed(&self) -> usize {
        self.destroyed.load(Ordering::Relaxed)
    }
}

impl TextureDevice for HeadlessDevice {
    fn create_texture(&self, data: &TextureData) -> AssetResult<DeviceHandle> {
        if !data.is_valid() {
            return Err(AssetError::DeviceUpload(format!(
                "invalid {}x{} {:?} buffer",
                data.width, data.height, data.format
            )));
        }
        let handle = DeviceHandle(self.next.fetch_add(1, Ordering::Relaxed));
        self.live.lock().push(handle);
        self.created.fetch_add(1, Ordering::Relaxed);
        log::debug!("Created device texture {:?}", handle);
        Ok(handle)
    }

    fn destroy_texture(&self, handle: DeviceHandle) {
        let mut live = self.live.lock();
        match live.iter().position(|h| *h == handle) {
            Some(i) => {
                live.swap_remove(i);
                self.destroyed.fetch_add(1, Ordering::Relaxed);
                log::debug!("Destroyed device texture {:?}", handle);
            }
            None => log::warn!("Destroy of unknown device texture {:?}", handle),
        }
    }
}
