//! Surface materials and their texture-map slots.

use crate::texture::Texture;

/// Index of a material in a model's material pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Texture-map slot on a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapSlot {
    Ambient,
    Diffuse,
    Specular,
    Emissive,
    Shininess,
    Alpha,
    Bump,
}

impl MapSlot {
    pub const ALL: [MapSlot; 7] = [
        MapSlot::Ambient,
        MapSlot::Diffuse,
        MapSlot::Specular,
        MapSlot::Emissive,
        MapSlot::Shininess,
        MapSlot::Alpha,
        MapSlot::Bump,
    ];

    /// Slot addressed by an MTL map directive.
    pub fn from_directive(directive: &str) -> Option<Self> {
        Some(match directive {
            "map_Ka" => MapSlot::Ambient,
            "map_Kd" => MapSlot::Diffuse,
            "map_Ks" => MapSlot::Specular,
            "map_Ke" => MapSlot::Emissive,
            "map_Ns" => MapSlot::Shininess,
            "map_d" => MapSlot::Alpha,
            "map_Bump" | "map_bump" | "bump" => MapSlot::Bump,
            _ => return None,
        })
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Named bundle of reflectance coefficients and optional texture maps.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    /// RGBA; colour directives set RGB and leave A at 1.
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emissive: [f32; 4],
    pub shininess: f32,
    /// Opacity in `0..=1`, 1 is opaque.
    pub alpha: f32,
    pub illumination_model: i32,
    maps: [Option<Texture>; 7],
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [0.0, 0.0, 0.0, 1.0],
            emissive: [0.0, 0.0, 0.0, 1.0],
            shininess: 2.0,
            alpha: 1.0,
            illumination_model: 1,
            maps: Default::default(),
        }
    }

    pub fn map(&self, slot: MapSlot) -> Option<&Texture> {
        self.maps[slot.index()].as_ref()
    }

    /// Attach a texture, returning the one it replaces.
    pub fn set_map(&mut self, slot: MapSlot, texture: Texture) -> Option<Texture> {
        self.maps[slot.index()].replace(texture)
    }

    pub fn take_map(&mut self, slot: MapSlot) -> Option<Texture> {
        self.maps[slot.index()].take()
    }

    pub fn diffuse_map(&self) -> Option<&Texture> {
        self.map(MapSlot::Diffuse)
    }

    /// Occupied slots in declaration order.
    pub fn maps(&self) -> impl Iterator<Item = (MapSlot, &Texture)> {
        MapSlot::ALL
            .into_iter()
            .filter_map(|slot| self.map(slot).map(|t| (slot, t)))
    }

    /// Drawn in the second (blended) pass.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha < 1.0
    }

    /// Diffuse colour with `alpha` as its fourth component.
    pub fn diffuse_with_alpha(&self) -> [f32; 4] {
        let [r, g, b, _] = self.diffuse;
        [r, g, b, self.alpha]
    }
}
