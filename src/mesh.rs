//! Triangle meshes: vertex/texcoord storage, faces, and OBJ loading.

use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::colors;
use crate::error::LoadError;
use crate::math::vec3::Vec3;
use crate::texture::{TexCoord, Texture};
use crate::transform::Transform;

/// A triangle referencing a mesh's vertex and texture coordinate storage.
///
/// `a`, `b`, `c` index [`Mesh::vertices`]; `a_uv`, `b_uv`, `c_uv` index
/// [`Mesh::texcoords`]. Indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub a_uv: u32,
    pub b_uv: u32,
    pub c_uv: u32,
    pub color: u32,
}

impl Face {
    pub const fn new(vertices: [u32; 3], texcoords: [u32; 3], color: u32) -> Self {
        Self {
            a: vertices[0],
            b: vertices[1],
            c: vertices[2],
            a_uv: texcoords[0],
            b_uv: texcoords[1],
            c_uv: texcoords[2],
            color,
        }
    }

    pub fn vertex_indices(&self) -> [usize; 3] {
        [self.a as usize, self.b as usize, self.c as usize]
    }

    pub fn texcoord_indices(&self) -> [usize; 3] {
        [self.a_uv as usize, self.b_uv as usize, self.c_uv as usize]
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

pub const CUBE_TEXCOORDS: [TexCoord; 4] = [
    TexCoord::new(0.0, 1.0),
    TexCoord::new(0.0, 0.0),
    TexCoord::new(1.0, 0.0),
    TexCoord::new(1.0, 1.0),
];

// Every side is two clockwise triangles sharing the same UV layout.
pub const CUBE_FACES: [Face; 12] = [
    // Front
    Face::new([0, 1, 2], [0, 1, 2], colors::RED),
    Face::new([0, 2, 3], [0, 2, 3], colors::RED),
    // Right
    Face::new([3, 2, 4], [0, 1, 2], colors::GREEN),
    Face::new([3, 4, 5], [0, 2, 3], colors::GREEN),
    // Back
    Face::new([5, 4, 6], [0, 1, 2], colors::BLUE),
    Face::new([5, 6, 7], [0, 2, 3], colors::BLUE),
    // Left
    Face::new([7, 6, 1], [0, 1, 2], colors::YELLOW),
    Face::new([7, 1, 0], [0, 2, 3], colors::YELLOW),
    // Top
    Face::new([1, 6, 4], [0, 1, 2], colors::MAGENTA),
    Face::new([1, 4, 2], [0, 2, 3], colors::MAGENTA),
    // Bottom
    Face::new([5, 7, 0], [0, 1, 2], colors::CYAN),
    Face::new([5, 0, 3], [0, 2, 3], colors::CYAN),
];

/// A triangle mesh with its own transform and optional texture.
///
/// Every face index is checked at construction, so the pipeline can index
/// vertex and texcoord storage directly.
#[derive(Clone, Debug)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    texcoords: Vec<TexCoord>,
    faces: Vec<Face>,
    texture: Option<Rc<Texture>>,
    transform: Transform,
}

impl Mesh {
    /// Builds a mesh, rejecting faces that point past the vertex or texcoord storage.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        texcoords: Vec<TexCoord>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        for (i, face) in faces.iter().enumerate() {
            check_indices(i, face.vertex_indices(), vertices.len())?;
            check_indices(i, face.texcoord_indices(), texcoords.len())?;
        }

        Ok(Self {
            name: name.into(),
            vertices,
            texcoords,
            faces,
            texture: None,
            transform: Transform::default(),
        })
    }

    /// The built-in unit cube: 8 vertices, 12 faces, one color per side.
    pub fn cube() -> Self {
        Self {
            name: "cube".to_string(),
            vertices: CUBE_VERTICES.to_vec(),
            texcoords: CUBE_TEXCOORDS.to_vec(),
            faces: CUBE_FACES.to_vec(),
            texture: None,
            transform: Transform::default(),
        }
    }

    /// Loads every object of an OBJ file into a single mesh.
    ///
    /// Polygons are triangulated on load. Faces without texture coordinates
    /// map to a single `(0, 0)` texcoord; all faces are white.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut vertices = Vec::new();
        let mut texcoords = Vec::new();
        let mut faces = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let vertex_base = vertices.len() as u32;
            let texcoord_base = texcoords.len() as u32;

            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
            texcoords.extend(
                mesh.texcoords
                    .chunks_exact(2)
                    .map(|t| TexCoord::new(t[0], t[1])),
            );

            let has_uvs = mesh.texcoord_indices.len() == mesh.indices.len();
            if !has_uvs && texcoords.len() as u32 == texcoord_base {
                texcoords.push(TexCoord::default());
            }

            for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
                let uv = if has_uvs {
                    let t = &mesh.texcoord_indices[i * 3..i * 3 + 3];
                    [
                        texcoord_base + t[0],
                        texcoord_base + t[1],
                        texcoord_base + t[2],
                    ]
                } else {
                    [texcoord_base; 3]
                };
                faces.push(Face::new(
                    [
                        vertex_base + tri[0],
                        vertex_base + tri[1],
                        vertex_base + tri[2],
                    ],
                    uv,
                    colors::WHITE,
                ));
            }
            debug!(object = %model.name, faces = mesh.indices.len() / 3, "OBJ object");
        }

        if faces.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mesh = Self::new(name, vertices, texcoords, faces)?;
        info!(
            path = %path.display(),
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            "Loaded mesh"
        );
        Ok(mesh)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn texcoords(&self) -> &[TexCoord] {
        &self.texcoords
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texture(&self) -> Option<&Rc<Texture>> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Rc<Texture>) {
        self.texture = Some(texture);
    }

    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

fn check_indices(face: usize, indices: [usize; 3], available: usize) -> Result<(), LoadError> {
    match indices.into_iter().find(|&i| i >= available) {
        Some(index) => Err(LoadError::InvalidFace {
            face,
            index: index as u32,
            available,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("softpipe_{}_{name}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn cube_faces_are_in_range() {
        let cube = Mesh::cube();
        let rebuilt = Mesh::new(
            "cube",
            cube.vertices().to_vec(),
            cube.texcoords().to_vec(),
            cube.faces().to_vec(),
        );
        assert!(rebuilt.is_ok());
        assert_eq!(cube.faces().len(), 12);
    }

    #[test]
    fn rejects_out_of_range_vertex() {
        let faces = vec![Face::new([0, 1, 3], [0, 0, 0], colors::WHITE)];
        let err = Mesh::new("bad", CUBE_VERTICES[..3].to_vec(), vec![TexCoord::default()], faces)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidFace {
                face: 0,
                index: 3,
                available: 3
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_texcoord() {
        let faces = vec![Face::new([0, 1, 2], [0, 0, 1], colors::WHITE)];
        let err = Mesh::new("bad", CUBE_VERTICES[..3].to_vec(), vec![TexCoord::default()], faces)
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidFace { index: 1, .. }));
    }

    #[test]
    fn loads_obj_with_texcoords() {
        let path = write_temp_obj(
            "quad",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             f 1/1 2/2 3/3 4/4\n",
        );
        let mesh = Mesh::from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.texcoords().len(), 4);
        // A quad triangulates into two faces
        assert_eq!(mesh.faces().len(), 2);
        for face in mesh.faces() {
            for (v, t) in face.vertex_indices().into_iter().zip(face.texcoord_indices()) {
                assert_eq!(mesh.vertices()[v].x, mesh.texcoords()[t].u);
                assert_eq!(mesh.vertices()[v].y, mesh.texcoords()[t].v);
            }
        }
    }

    #[test]
    fn loads_obj_without_texcoords() {
        let path = write_temp_obj("tri", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let mesh = Mesh::from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.faces().len(), 1);
        assert_eq!(mesh.texcoords(), &[TexCoord::default()]);
        assert_eq!(mesh.faces()[0].texcoord_indices(), [0, 0, 0]);
    }

    #[test]
    fn missing_obj_is_an_error() {
        assert!(Mesh::from_obj("/definitely/not/here.obj").is_err());
    }
}
