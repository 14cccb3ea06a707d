//! MTL material-library parser.

use std::{
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
    sync::Arc,
};

use crate::{
    device::TextureDevice,
    error::AssetError,
    material::{MapSlot, Material},
    report::LoadReport,
    source::{SourceFs, sibling},
    text::{Fields, Lines},
    texture::Texture,
};

/// Loads material libraries and the textures they reference.
pub struct MtlLoader<'a> {
    fs: &'a dyn SourceFs,
    device: &'a Arc<dyn TextureDevice>,
}

impl<'a> MtlLoader<'a> {
    pub fn new(fs: &'a dyn SourceFs, device: &'a Arc<dyn TextureDevice>) -> Self {
        Self { fs, device }
    }

    /// Append every material in the library at `path` to `materials`.
    ///
    /// An unreadable library adds a warning and leaves `materials` alone.
    /// Materials parsed before a mid-file read error are kept.
    pub fn load(&self, path: &Path, materials: &mut Vec<Material>, report: &mut LoadReport) {
        log::info!("Loading material library {:?}", path);
        let reader = match self.fs.open(path) {
            Ok(reader) => reader,
            Err(e) => {
                report.warn(AssetError::unreadable(path, e));
                return;
            }
        };
        let before = materials.len();
        if let Err(e) = self.parse(BufReader::new(reader), path, materials, report) {
            report.warn(AssetError::unreadable(path, e));
        }
        log::info!(
            "Loaded {} material(s) from {:?}",
            materials.len() - before,
            path
        );
    }

    /// Parse library text. `path` is only used to resolve texture file names.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
        path: &Path,
        materials: &mut Vec<Material>,
        report: &mut LoadReport,
    ) -> io::Result<()> {
        let mut lines = Lines::new(reader);
        let mut current: Option<usize> = None;

        while let Some((line_no, line)) = lines.next_line()? {
            let mut tokens = line.split_whitespace();
            let Some(directive) = tokens.next() else {
                continue;
            };

            if directive == "newmtl" {
                let name = tokens.next().unwrap_or_default();
                log::debug!("newmtl {name}");
                materials.push(Material::new(name));
                current = Some(materials.len() - 1);
                continue;
            }

            let Some(i) = current else {
                log::debug!("line {line_no}: '{directive}' before any newmtl, ignored");
                continue;
            };
            self.apply(&mut materials[i], directive, tokens, path, line_no, report);
        }
        Ok(())
    }

    fn apply<'b>(
        &self,
        material: &mut Material,
        directive: &'b str,
        tokens: SplitWhitespace<'b>,
        path: &Path,
        line_no: usize,
        report: &mut LoadReport,
    ) {
        if let Some(slot) = MapSlot::from_directive(directive) {
            // Option flags may precede the file name.
            match tokens.last() {
                Some(file) => self.load_map(material, slot, &sibling(path, file), report),
                None => log::debug!("line {line_no}: '{directive}' without a file name"),
            }
            return;
        }

        let mut f = Fields::new(directive, tokens, line_no);
        match directive {
            // Some exporters write `illum 2.0`.
            "illum" => material.illumination_model = f.value::<f32>() as i32,
            "Ka" => set_rgb(&mut material.ambient, f.next_vec3()),
            "Kd" => set_rgb(&mut material.diffuse, f.next_vec3()),
            "Ks" => set_rgb(&mut material.specular, f.next_vec3()),
            "Ke" => set_rgb(&mut material.emissive, f.next_vec3()),
            "Ns" => material.shininess = f.next_f32(),
            "d" | "Tr" => material.alpha = f.next_f32(),
            "Tf" => {
                let [r, g, b] = f.next_vec3();
                material.alpha = (r + g + b) / 3.0;
            }
            _ => return,
        }
        if let Some(err) = f.finish() {
            report.warn(err);
        }
    }

    fn load_map(
        &self,
        material: &mut Material,
        slot: MapSlot,
        file: &Path,
        report: &mut LoadReport,
    ) {
        match Texture::load(self.fs, self.device, file) {
            Ok(texture) => {
                if material.set_map(slot, texture).is_some() {
                    log::debug!("{:?} map of '{}' replaced", slot, material.name);
                }
            }
            Err(e) => report.warn(e),
        }
    }
}

fn set_rgb(dst: &mut [f32; 4], [r, g, b]: [f32; 3]) {
    dst[0] = r;
    dst[1] = g;
    dst[2] = b;
}
