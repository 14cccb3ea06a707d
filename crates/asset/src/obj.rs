//! OBJ geometry parser: attribute pools, groups, faces and material binding.

use std::{
    io::{BufRead, BufReader, Cursor},
    path::Path,
    str::SplitWhitespace,
    sync::Arc,
};

use corelib::Vec3;

use crate::{
    device::TextureDevice,
    error::{AssetError, AssetResult, AttributeKind},
    material::MaterialId,
    mtl::MtlLoader,
    report::LoadReport,
    scene::{DEFAULT_OBJECT, Face, Geometry, GroupObject},
    source::{SourceFs, sibling},
    text::{Fields, Lines},
};

/// Parses OBJ scenes, pulling in referenced material libraries.
///
/// Faces only carry pool indices; centres and normals are filled in by
/// [`crate::assemble`].
pub struct ObjLoader<'a> {
    fs: &'a dyn SourceFs,
    device: &'a Arc<dyn TextureDevice>,
}

/// Parser state that lives for one file.
struct ParseState {
    geometry: Geometry,
    group: usize,
    material: Option<MaterialId>,
}

impl<'a> ObjLoader<'a> {
    pub fn new(fs: &'a dyn SourceFs, device: &'a Arc<dyn TextureDevice>) -> Self {
        Self { fs, device }
    }

    /// Load an OBJ file from `path`.
    pub fn load(&self, path: &Path, report: &mut LoadReport) -> AssetResult<Geometry> {
        let reader = self
            .fs
            .open(path)
            .map_err(|e| AssetError::unreadable(path, e))?;
        self.parse(BufReader::new(reader), path, report)
    }

    /// Convenience helper to parse an OBJ string; libraries resolve against `path`.
    pub fn parse_str(
        &self,
        contents: &str,
        path: &Path,
        report: &mut LoadReport,
    ) -> AssetResult<Geometry> {
        self.parse(Cursor::new(contents), path, report)
    }

    /// Parse OBJ text. A read error part-way through fails the whole parse.
    pub fn parse<R: BufRead>(
        &self,
        reader: R,
        path: &Path,
        report: &mut LoadReport,
    ) -> AssetResult<Geometry> {
        let mut state = ParseState {
            geometry: Geometry::new(),
            group: 0,
            material: None,
        };
        let mut lines = Lines::new(reader);

        while let Some((line_no, line)) = lines
            .next_line()
            .map_err(|e| AssetError::unreadable(path, e))?
        {
            let mut tokens = line.split_whitespace();
            let Some(directive) = tokens.next() else {
                continue;
            };

            match directive {
                "#" => {}
                "mtllib" => {
                    let mtl = MtlLoader::new(self.fs, self.device);
                    for name in tokens {
                        mtl.load(
                            &sibling(path, name),
                            &mut state.geometry.materials,
                            report,
                        );
                    }
                }
                "usemtl" => {
                    let name = tokens.next().unwrap_or_default();
                    state.material = state.geometry.find_material(name);
                    if state.material.is_none() {
                        log::debug!("line {line_no}: no material '{name}', faces unbound");
                    }
                }
                "v" | "vt" | "vn" => {
                    let mut f = Fields::new(directive, tokens, line_no);
                    let value = Vec3::from_array(f.next_vec3());
                    let pool = match directive {
                        "v" => &mut state.geometry.vertices,
                        "vt" => &mut state.geometry.texcoords,
                        _ => &mut state.geometry.normals,
                    };
                    pool.push(value);
                    if let Some(err) = f.finish() {
                        report.warn(err);
                    }
                }
                "g" => {
                    let name = tokens.next().unwrap_or_default();
                    if name == DEFAULT_OBJECT {
                        state.group = 0;
                    } else {
                        let group_name = tokens.next().unwrap_or_default();
                        state
                            .geometry
                            .objects
                            .push(GroupObject::new(name, group_name));
                        state.group = state.geometry.objects.len() - 1;
                    }
                }
                "f" => match parse_face(&state.geometry, tokens, line_no) {
                    Ok(mut face) => {
                        face.material = state.material;
                        state.geometry.objects[state.group].faces.push(face);
                    }
                    Err(err) => report.warn(err),
                },
                _ => {
                    // Unknown directives (o/s/l/curves/...) are skipped.
                }
            }
        }

        let g = &state.geometry;
        log::info!(
            "Parsed {:?}: {} vertices, {} texcoords, {} normals, {} objects, {} faces, {} materials",
            path,
            g.vertices.len(),
            g.texcoords.len(),
            g.normals.len(),
            g.objects.len(),
            g.face_count(),
            g.materials.len()
        );
        Ok(state.geometry)
    }
}

/// Resolve the `v`, `v/t`, `v/t/n` or `v//n` references of one `f` line.
///
/// Fails on the first reference that cannot be resolved; the caller then
/// drops the whole face.
fn parse_face(geometry: &Geometry, refs: SplitWhitespace<'_>, line: usize) -> AssetResult<Face> {
    let mut face = Face::default();
    for token in refs {
        let mut parts = token.split('/');
        let (v, t, n) = (parts.next(), parts.next(), parts.next());

        if let Some(i) = resolve_index(v, geometry.vertices.len(), AttributeKind::Vertex, line)? {
            face.vertices.push(i);
        }
        let texcoords = geometry.texcoords.len();
        if let Some(i) = resolve_index(t, texcoords, AttributeKind::TexCoord, line)? {
            face.texcoords.push(i);
        }
        if let Some(i) = resolve_index(n, geometry.normals.len(), AttributeKind::Normal, line)? {
            face.normals.push(i);
        }
    }
    Ok(face)
}

/// Map a 1-based reference to a pool index.
///
/// Absent or empty parts, and parts pointing into an empty pool, resolve to
/// `None`. Anything outside `1..=len` is a dangling reference.
fn resolve_index(
    part: Option<&str>,
    len: usize,
    kind: AttributeKind,
    line: usize,
) -> AssetResult<Option<usize>> {
    let Some(part) = part.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if len == 0 {
        return Ok(None);
    }
    let raw: i64 = part.parse().map_err(|_| AssetError::MalformedNumericField {
        line,
        directive: "f".to_owned(),
        token: part.to_owned(),
    })?;
    if raw < 1 || raw as u64 > len as u64 {
        return Err(AssetError::DanglingIndexReference {
            line,
            kind,
            index: raw,
            len,
        });
    }
    Ok(Some(raw as usize - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{device::HeadlessDevice, source::MemoryFs};
    use corelib::vec3;

    fn parse_with(fs: &MemoryFs, src: &str) -> (Geometry, LoadReport) {
        let device: Arc<dyn TextureDevice> = Arc::new(HeadlessDevice::new());
        let mut report = LoadReport::new();
        let geometry = ObjLoader::new(fs, &device)
            .parse_str(src, Path::new("scenes/test.obj"), &mut report)
            .expect("parse");
        (geometry, report)
    }

    fn parse(src: &str) -> (Geometry, LoadReport) {
        parse_with(&MemoryFs::new(), src)
    }

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            # triangle
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            vn 0.0 0.0 1.0
            vt 0.0 0.0
            vt 1.0 0.0
            vt 0.0 1.0
            f 1/1/1 2/2/1 3/3/1
        "#;
        let (g, report) = parse(src);
        assert!(report.is_clean());
        assert_eq!(g.vertices.len(), 3);
        assert_eq!(g.texcoords[1], vec3(1.0, 0.0, 0.0));
        let face = &g.default_object().faces[0];
        assert_eq!(face.vertices, vec![0, 1, 2]);
        assert_eq!(face.texcoords, vec![0, 1, 2]);
        assert_eq!(face.normals, vec![0, 0, 0]);
        assert!(face.material.is_none());
    }

    #[test]
    fn reference_forms() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\nf 1 2 3 4\n";
        let (g, report) = parse(src);
        assert!(report.is_clean());
        let faces = &g.default_object().faces;
        assert_eq!(faces[0].vertices.len(), 3);
        assert_eq!(faces[0].normals.len(), 3);
        assert!(faces[0].texcoords.is_empty());
        // Normals exist but this line does not reference them.
        assert_eq!(faces[1].vertices, vec![0, 1, 2, 3]);
        assert!(faces[1].normals.is_empty());
    }

    #[test]
    fn refs_into_empty_pools_are_ignored() {
        let (g, report) = parse("v 0 0 0\nf 1/4/9 1/5/9\n");
        assert!(report.is_clean());
        let face = &g.default_object().faces[0];
        assert_eq!(face.vertices, vec![0, 0]);
        assert!(face.texcoords.is_empty());
        assert!(face.normals.is_empty());
    }

    #[test]
    fn dangling_reference_rejects_only_that_face() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\nf 1 2 3\nf 0 1 2\nf -1 -2 -3\n";
        let (g, report) = parse(src);
        assert_eq!(g.face_count(), 1);
        assert_eq!(g.default_object().faces[0].vertices, vec![0, 1, 2]);
        assert_eq!(
            report.count(|e| matches!(
                e,
                AssetError::DanglingIndexReference {
                    kind: AttributeKind::Vertex,
                    ..
                }
            )),
            3
        );
        match &report.warnings[0] {
            AssetError::DanglingIndexReference {
                line, index, len, ..
            } => assert_eq!((*line, *index, *len), (4, 4, 3)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dangling_texcoord_and_normal_reject_face() {
        let src = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/2/1\nf 1/1/5\nf 1/1/1\n";
        let (g, report) = parse(src);
        assert_eq!(g.face_count(), 1);
        let face = &g.default_object().faces[0];
        assert_eq!((face.texcoords.len(), face.normals.len()), (1, 1));
        assert_eq!(report.warnings.len(), 2);
        assert!(matches!(
            report.warnings[0],
            AssetError::DanglingIndexReference {
                line: 4,
                kind: AttributeKind::TexCoord,
                index: 2,
                len: 1
            }
        ));
        assert!(matches!(
            report.warnings[1],
            AssetError::DanglingIndexReference {
                line: 5,
                kind: AttributeKind::Normal,
                index: 5,
                len: 1
            }
        ));
    }

    #[test]
    fn face_references_resolve_to_pool_values() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
                   vt 0.5 0.5\nvt 1 1\n\
                   vn 0 0 1\nvn 0 1 0\n\
                   f 3/2/1 1/1/2 2/2/2\n";
        let (g, report) = parse(src);
        assert!(report.is_clean());
        let face = &g.default_object().faces[0];
        let positions: Vec<_> = g.face_positions(face).collect();
        assert_eq!(
            positions,
            [vec3(0.0, 1.0, 0.0), vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)]
        );
        let uvs: Vec<_> = g.face_texcoords(face).collect();
        assert_eq!(
            uvs,
            [vec3(1.0, 1.0, 0.0), vec3(0.5, 0.5, 0.0), vec3(1.0, 1.0, 0.0)]
        );
        let normals: Vec<_> = g.face_normals(face).collect();
        assert_eq!(normals, [Vec3::Z, Vec3::Y, Vec3::Y]);
    }

    #[test]
    fn malformed_index_rejects_face() {
        let (g, report) = parse("v 0 0 0\nf 1 x 1\n");
        assert_eq!(g.face_count(), 0);
        assert_eq!(
            report.count(|e| matches!(e, AssetError::MalformedNumericField { .. })),
            1
        );
    }

    #[test]
    fn malformed_coordinate_defaults_to_zero() {
        let (g, report) = parse("v 1 nope 3\nv 4 5\n");
        assert_eq!(g.vertices, vec![vec3(1.0, 0.0, 0.0), vec3(4.0, 5.0, 0.0)]);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn groups_are_never_merged_and_default_reactivates() {
        let src = "v 0 0 0\n\
                   f 1\n\
                   g body torso\n\
                   f 1\n\
                   g body\n\
                   f 1\n\
                   g default\n\
                   f 1\n\
                   f 1\n";
        let (g, _) = parse(src);
        assert_eq!(g.objects.len(), 3);
        assert_eq!(g.objects[0].object_name, DEFAULT_OBJECT);
        assert_eq!(g.objects[0].faces.len(), 3);
        assert_eq!(g.objects[1].object_name, "body");
        assert_eq!(g.objects[1].group_name, "torso");
        assert_eq!(g.objects[1].faces.len(), 1);
        assert_eq!(g.objects[2].object_name, "body");
        assert_eq!(g.objects[2].group_name, "");
        assert_eq!(g.objects[2].faces.len(), 1);
    }

    #[test]
    fn usemtl_binds_first_match_and_unknown_unbinds() {
        let fs = MemoryFs::new().with(
            "scenes/lib.mtl",
            "newmtl shared\nNs 1\nnewmtl shared\nNs 2\nnewmtl other\n",
        );
        let src = "mtllib lib.mtl\n\
                   v 0 0 0\n\
                   usemtl shared\n\
                   f 1\n\
                   usemtl other\n\
                   f 1\n\
                   usemtl missing\n\
                   f 1\n";
        let (g, report) = parse_with(&fs, src);
        assert!(report.is_clean());
        assert_eq!(g.materials.len(), 3);
        let faces = &g.default_object().faces;
        assert_eq!(faces[0].material, Some(MaterialId(0)));
        assert_eq!(g.material(MaterialId(0)).unwrap().shininess, 1.0);
        assert_eq!(faces[1].material, Some(MaterialId(2)));
        assert_eq!(faces[2].material, None);
    }

    #[test]
    fn multiple_libraries_accumulate() {
        let fs = MemoryFs::new()
            .with("scenes/a.mtl", "newmtl a\n")
            .with("scenes/b.mtl", "newmtl b\n");
        let (g, report) = parse_with(&fs, "mtllib a.mtl b.mtl\nmtllib missing.mtl\n");
        let names: Vec<_> = g.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            report.count(|e| matches!(e, AssetError::SourceUnreadable { .. })),
            1
        );
    }

    #[test]
    fn unknown_directives_are_ignored() {
        let (g, report) = parse("o thing\ns 1\nv 0 0 0\ncurv 0 1 1\n");
        assert!(report.is_clean());
        assert_eq!(g.vertices.len(), 1);
        assert_eq!(g.objects.len(), 1);
    }

    #[test]
    fn unreadable_scene_fails() {
        let device: Arc<dyn TextureDevice> = Arc::new(HeadlessDevice::new());
        let fs = MemoryFs::new();
        let err = ObjLoader::new(&fs, &device)
            .load(Path::new("nope.obj"), &mut LoadReport::new())
            .unwrap_err();
        assert!(matches!(err, AssetError::SourceUnreadable { .. }));
    }
}
