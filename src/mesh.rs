//! Validated mesh geometry and the global primitive ID ordering.
//!
//! A [`Mesh`] owns vertex positions plus edge and face index lists and
//! guarantees two invariants the renderer relies on:
//!
//! - every edge/face index refers to an existing vertex, and
//! - the total primitive count fits the 24-bit ID space.
//!
//! Global primitive IDs are 1-based and assigned in a fixed order: faces
//! `[1..=F]`, then edges `[F+1..=F+K]`, then vertices `[F+K+1..=F+K+N]`.
//! The ordering is stable for a given mesh, so an ID map rendered today can
//! be decoded against the same mesh tomorrow.

use std::collections::BTreeSet;

use crate::error::{RenderError, Result};
use crate::id::{Primitive, MAX_ID};
use crate::math::vec3::Vec3;

/// A triangulated mesh with optional explicit edges.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    edges: Vec<[u32; 2]>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh, validating every index and the total primitive count.
    pub fn new(vertices: Vec<Vec3>, edges: Vec<[u32; 2]>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let vertex_count = vertices.len();
        for (i, face) in faces.iter().enumerate() {
            for &index in face {
                if index as usize >= vertex_count {
                    return Err(RenderError::IndexOutOfRange {
                        kind: "face",
                        primitive: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        for (i, edge) in edges.iter().enumerate() {
            for &index in edge {
                if index as usize >= vertex_count {
                    return Err(RenderError::IndexOutOfRange {
                        kind: "edge",
                        primitive: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        let count = faces.len() + edges.len() + vertex_count;
        if count > MAX_ID as usize {
            return Err(RenderError::IdSpaceExhausted { count });
        }

        Ok(Self {
            vertices,
            edges,
            faces,
        })
    }

    /// Creates a mesh from flat caller-supplied arrays.
    ///
    /// This is the marshaling layer for numeric hosts that hand geometry
    /// over as packed buffers: `vertices` is 3xN doubles (x, y, z per
    /// vertex), `edges` is 2xK vertex index pairs and `faces` is 3xM index
    /// triples, all indices 0-based.
    pub fn from_flat(vertices: &[f64], edges: &[u32], faces: &[u32]) -> Result<Self> {
        if vertices.len() % 3 != 0 {
            return Err(RenderError::MalformedBuffer {
                name: "vertex",
                len: vertices.len(),
                arity: 3,
            });
        }
        if edges.len() % 2 != 0 {
            return Err(RenderError::MalformedBuffer {
                name: "edge",
                len: edges.len(),
                arity: 2,
            });
        }
        if faces.len() % 3 != 0 {
            return Err(RenderError::MalformedBuffer {
                name: "face",
                len: faces.len(),
                arity: 3,
            });
        }

        let vertices = vertices
            .chunks_exact(3)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
            .collect();
        let edges = edges.chunks_exact(2).map(|e| [e[0], e[1]]).collect();
        let faces = faces.chunks_exact(3).map(|f| [f[0], f[1], f[2]]).collect();
        Self::new(vertices, edges, faces)
    }

    /// Loads a mesh from an OBJ file, triangulating as needed.
    ///
    /// All models in the file are merged into a single mesh. Edges are
    /// derived from the triangle sides (each undirected edge once), so the
    /// result is directly usable for edge-level visibility queries.
    pub fn from_obj(file_path: &str) -> Result<Self> {
        let (models, _) = tobj::load_obj(
            file_path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let base = vertices.len() as u32;
            vertices.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
            );
            faces.extend(
                model
                    .mesh
                    .indices
                    .chunks_exact(3)
                    .map(|f| [base + f[0], base + f[1], base + f[2]]),
            );
        }

        // Collect each undirected edge exactly once.
        let mut edge_set = BTreeSet::new();
        for face in &faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                edge_set.insert((a.min(b), a.max(b)));
            }
        }
        let edges = edge_set.into_iter().map(|(a, b)| [a, b]).collect();

        log::debug!(
            "loaded {}: {} vertices, {} faces",
            file_path,
            vertices.len(),
            faces.len()
        );
        Self::new(vertices, edges, faces)
    }

    /// A unit cube centered on the origin, faces wound counter-clockwise
    /// when seen from outside. Handy as a fixture for tests and demos.
    pub fn cube() -> Self {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        let faces = vec![
            // Front (z = 1)
            [4, 5, 6],
            [4, 6, 7],
            // Back (z = -1)
            [1, 0, 3],
            [1, 3, 2],
            // Left (x = -1)
            [0, 4, 7],
            [0, 7, 3],
            // Right (x = 1)
            [5, 1, 2],
            [5, 2, 6],
            // Top (y = 1)
            [7, 6, 2],
            [7, 2, 3],
            // Bottom (y = -1)
            [0, 1, 5],
            [0, 5, 4],
        ];
        Self::new(vertices, edges, faces).expect("cube fixture is always valid")
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Total number of primitives (faces + edges + vertices), which is also
    /// the largest ID the mesh occupies.
    pub fn primitive_count(&self) -> usize {
        self.faces.len() + self.edges.len() + self.vertices.len()
    }

    /// Classifies a decoded pixel ID against this mesh's primitive ordering.
    ///
    /// Returns `None` for the background ID 0 and for IDs beyond the mesh's
    /// primitive count.
    pub fn primitive(&self, id: u32) -> Option<Primitive> {
        if id == 0 {
            return None;
        }
        let mut index = id as usize - 1;
        if index < self.faces.len() {
            return Some(Primitive::Face(index));
        }
        index -= self.faces.len();
        if index < self.edges.len() {
            return Some(Primitive::Edge(index));
        }
        index -= self.edges.len();
        if index < self.vertices.len() {
            return Some(Primitive::Vertex(index));
        }
        None
    }
}
