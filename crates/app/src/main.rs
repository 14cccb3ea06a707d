//! Scene inspector: loads one OBJ scene and logs what came out of it.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use asset::{HeadlessDevice, MapSlot, Model};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Summary {
    Brief,
    Full,
}

fn parse_summary_arg() -> Summary {
    // --summary=brief|full, default brief
    for arg in std::env::args() {
        if let Some(val) = arg.strip_prefix("--summary=") {
            return match val.to_ascii_lowercase().as_str() {
                "brief" => Summary::Brief,
                "full" => Summary::Full,
                other => {
                    log::warn!("Unknown summary '{}', falling back to brief.", other);
                    Summary::Brief
                }
            };
        }
    }
    Summary::Brief
}

fn parse_path_arg() -> Option<String> {
    std::env::args().skip(1).find(|arg| !arg.starts_with("--"))
}

fn log_full(model: &Model) {
    for (i, object) in model.objects().iter().enumerate() {
        log::info!(
            "object #{} '{}' group '{}': {} face(s)",
            i,
            object.object_name,
            object.group_name,
            object.faces.len()
        );
    }
    for material in model.materials() {
        let maps: Vec<String> = MapSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                material
                    .map(slot)
                    .map(|t| format!("{:?} {}x{}", slot, t.width(), t.height()))
            })
            .collect();
        log::info!(
            "material '{}': Kd {:?}, alpha {}, Ns {}, illum {}, maps [{}]",
            material.name,
            material.diffuse,
            material.alpha,
            material.shininess,
            material.illumination_model,
            maps.join(", ")
        );
    }
    log::info!("bounding corners: {:?}", model.bounding_corners());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let summary = parse_summary_arg();
    let Some(path) = parse_path_arg() else {
        bail!("usage: app <scene.obj> [--summary=brief|full]");
    };

    let device = Arc::new(HeadlessDevice::new());
    let (model, report) = Model::open(&path, device.clone())
        .with_context(|| format!("Failed to load scene: {}", path))?;

    let geometry = model.geometry();
    log::info!(
        "{}: {} object(s), {} face(s), {} vertices, {} material(s), {} texture(s)",
        model.path().display(),
        geometry.objects.len(),
        geometry.face_count(),
        geometry.vertices.len(),
        geometry.materials.len(),
        device.live_textures()
    );
    log::info!("center {:?}, radius {:.4}", model.center(), model.radius());

    if summary == Summary::Full {
        log_full(&model);
    }

    if !report.is_clean() {
        log::warn!("{} warning(s) while loading", report.warnings.len());
    }

    Ok(())
}
