//! Asset loading for textured polygon scenes.
//!
//! OBJ geometry with MTL material libraries and uncompressed TGA textures,
//! assembled into a [`Model`] that a renderer can walk read-only.

pub mod assemble;
pub mod device;
pub mod error;
pub mod material;
pub mod mesh;
pub mod model;
pub mod mtl;
pub mod obj;
pub mod report;
pub mod scene;
pub mod source;
pub mod texture;
pub mod tga;

mod text;

pub use assemble::SceneBounds;
pub use device::{DeviceHandle, HeadlessDevice, TextureDevice};
pub use error::{AssetError, AssetResult, AttributeKind};
pub use material::{MapSlot, Material, MaterialId};
pub use mesh::{MeshData, MeshVertex};
pub use model::Model;
pub use report::LoadReport;
pub use scene::{Face, Geometry, GroupObject};
pub use source::{DiskFs, MemoryFs, SourceFs};
pub use texture::{Texture, TextureData, TextureFormat};
