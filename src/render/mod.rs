//! The rendering pipeline: primitive iteration, projection, culling, and
//! the two offscreen entry points.
//!
//! Both entry points are stateless: each call creates its own framebuffer,
//! walks the mesh primitives in the fixed face/edge/vertex order, and hands
//! back the extracted bytes. Visibility is decided purely by the per-pixel
//! depth test; the draw order only breaks exact depth ties (in favor of
//! vertices over edges over faces, drawn last).

mod framebuffer;
mod lighting;
mod raster;

pub use framebuffer::FrameBuffer;

use crate::camera::{Camera, ScreenPoint};
use crate::error::Result;
use crate::id::encode;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;

/// Background color in ID-map mode; decodes to the reserved ID 0.
const ID_BACKGROUND: [u8; 3] = [0, 0, 0];
/// Background color in shaded mode.
const SHADED_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Explicit render state, replacing the mutable global flags of a
/// fixed-function pipeline.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Cull triangles that face away from the camera. Applies to faces
    /// only; edges and points have no facing direction.
    pub cull_back_faces: bool,
    /// Side length in pixels of the square drawn per vertex.
    pub point_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_back_faces: true,
            point_size: 1,
        }
    }
}

/// Projects the three corners of a face, or `None` when any corner is on
/// or behind the eye plane.
fn project_face(
    camera: &Camera,
    vertices: &[Vec3],
    face: &[u32; 3],
    width: u32,
    height: u32,
) -> Option<[ScreenPoint; 3]> {
    Some([
        camera.project(vertices[face[0] as usize], width, height)?,
        camera.project(vertices[face[1] as usize], width, height)?,
        camera.project(vertices[face[2] as usize], width, height)?,
    ])
}

/// Renders the primitive ID map.
///
/// Each pixel of the returned image encodes, via [`crate::id::encode`], the
/// 1-based global ID of the nearest primitive visible there: faces first,
/// then edges, then vertices, with `(0, 0, 0)` for background. Output is a
/// flat `3 * width * height` byte array, row-major from the top scanline,
/// R, G, B per pixel.
pub fn render_id_map(
    camera: &Camera,
    mesh: &Mesh,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    log::debug!(
        "ID-map render: {}x{}, {} faces, {} edges, {} vertices",
        width,
        height,
        mesh.faces().len(),
        mesh.edges().len(),
        mesh.vertices().len()
    );
    let mut fb = FrameBuffer::new(width, height, ID_BACKGROUND)?;
    let vertices = mesh.vertices();

    let face_base = 1u32;
    for (i, face) in mesh.faces().iter().enumerate() {
        let Some(points) = project_face(camera, vertices, face, width, height) else {
            continue;
        };
        // Back-facing triangles contribute neither color nor depth.
        if config.cull_back_faces && raster::signed_area(&points) <= 0.0 {
            continue;
        }
        raster::fill_triangle(&mut fb, &points, encode(face_base + i as u32));
    }

    let edge_base = face_base + mesh.faces().len() as u32;
    for (i, edge) in mesh.edges().iter().enumerate() {
        let (Some(a), Some(b)) = (
            camera.project(vertices[edge[0] as usize], width, height),
            camera.project(vertices[edge[1] as usize], width, height),
        ) else {
            continue;
        };
        raster::draw_line(&mut fb, &a, &b, encode(edge_base + i as u32));
    }

    let vertex_base = edge_base + mesh.edges().len() as u32;
    for (i, &vertex) in vertices.iter().enumerate() {
        if let Some(p) = camera.project(vertex, width, height) {
            raster::draw_point(&mut fb, &p, config.point_size, encode(vertex_base + i as u32));
        }
    }

    Ok(fb.into_bytes())
}

/// Renders a flat-shaded view of the mesh faces under the fixed
/// three-point-light rig of [`lighting`].
///
/// Edges and vertices are not drawn in this mode. `light_positions` are
/// world-space point light positions. Back-face culling and the depth test
/// behave exactly as in ID-map mode; the background clears to white.
pub fn render_shaded(
    camera: &Camera,
    mesh: &Mesh,
    width: u32,
    height: u32,
    light_positions: &[Vec3; 3],
) -> Result<Vec<u8>> {
    log::debug!(
        "shaded render: {}x{}, {} faces",
        width,
        height,
        mesh.faces().len()
    );
    let mut fb = FrameBuffer::new(width, height, SHADED_BACKGROUND)?;
    let vertices = mesh.vertices();
    let lights_eye = light_positions.map(|l| camera.to_eye(l));

    for face in mesh.faces() {
        let v1 = vertices[face[0] as usize];
        let v2 = vertices[face[1] as usize];
        let v3 = vertices[face[2] as usize];

        // Flat normal from the winding; degenerate triangles are skipped
        // rather than letting a zero-length normal poison the lighting.
        let Some(normal) = (v2 - v1).cross(v3 - v1).try_normalize() else {
            continue;
        };

        let Some(points) = project_face(camera, vertices, face, width, height) else {
            continue;
        };
        if raster::signed_area(&points) <= 0.0 {
            continue;
        }

        let Some(normal_eye) = camera.direction_to_eye(normal).try_normalize() else {
            continue;
        };
        let centroid_eye = camera.to_eye((v1 + v2 + v3) / 3.0);
        let color = lighting::shade_flat(centroid_eye, normal_eye, &lights_eye);
        raster::fill_triangle(&mut fb, &points, color);
    }

    Ok(fb.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::id::decode;
    use crate::math::mat4::Mat4;

    const W: u32 = 10;
    const H: u32 = 10;

    /// Camera at the origin looking down -z over an orthographic volume
    /// spanning [-2, 2] in x/y and [-1, -10] in z.
    fn ortho_camera() -> Camera {
        Camera::new(
            Mat4::identity(),
            Mat4::orthographic(-2.0, 2.0, -2.0, 2.0, 1.0, 10.0),
        )
    }

    fn decode_at(bytes: &[u8], x: u32, y: u32) -> u32 {
        let idx = ((y * W + x) * 3) as usize;
        decode([bytes[idx], bytes[idx + 1], bytes[idx + 2]])
    }

    fn decoded_ids(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(3)
            .map(|px| decode([px[0], px[1], px[2]]))
            .collect()
    }

    /// A triangle at the given z plane that faces the -z-looking camera
    /// (counter-clockwise as seen from the origin).
    fn front_triangle(z: f64) -> Mesh {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
        ];
        Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap()
    }

    #[test]
    fn single_triangle_covers_id_one() {
        let bytes = render_id_map(
            &ortho_camera(),
            &front_triangle(-5.0),
            W,
            H,
            &RenderConfig::default(),
        )
        .unwrap();

        assert_eq!(bytes.len(), (3 * W * H) as usize);
        let ids = decoded_ids(&bytes);
        // Face ID 1 plus the three corner vertices (IDs 2..=4).
        assert!(ids.iter().all(|&id| id <= 4));
        assert!(ids.contains(&0));
        assert_eq!(decode_at(&bytes, 5, 5), 1);
    }

    #[test]
    fn plus_z_camera_sees_triangle_at_positive_z() {
        // Camera at the origin looking down +z; triangle at z = 5, wound to
        // face it.
        let camera = Camera::look_at(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 0.0),
            Mat4::orthographic(-2.0, 2.0, -2.0, 2.0, 1.0, 10.0),
        );
        let vertices = vec![
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap();

        let bytes = render_id_map(&camera, &mesh, W, H, &RenderConfig::default()).unwrap();
        assert_eq!(decode_at(&bytes, 5, 5), 1);
    }

    #[test]
    fn occluded_triangle_contributes_no_pixels() {
        // Two triangles with the same screen footprint; the nearer one (at
        // z = -2) must win every overlap pixel, leaving the farther (z = -5)
        // with nothing.
        let mut vertices = front_triangle(-2.0).vertices().to_vec();
        vertices.extend_from_slice(front_triangle(-5.0).vertices());
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2], [3, 4, 5]]).unwrap();

        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &RenderConfig::default()).unwrap();
        let ids = decoded_ids(&bytes);
        assert!(ids.contains(&1));
        assert_eq!(ids.iter().filter(|&&id| id == 2).count(), 0);
    }

    #[test]
    fn back_facing_triangle_is_invisible() {
        // Reversed winding relative to front_triangle.
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap();

        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &RenderConfig::default()).unwrap();
        // Only the corner vertex points may appear; the face never does.
        assert!(!decoded_ids(&bytes).contains(&1));

        let shaded = render_shaded(
            &ortho_camera(),
            &mesh,
            W,
            H,
            &[Vec3::ZERO, Vec3::ZERO, Vec3::ZERO],
        )
        .unwrap();
        assert!(shaded.iter().all(|&b| b == 255));
    }

    #[test]
    fn disabling_culling_shows_back_faces() {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap();
        let config = RenderConfig {
            cull_back_faces: false,
            ..Default::default()
        };
        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &config).unwrap();
        assert_eq!(decode_at(&bytes, 5, 5), 1);
    }

    #[test]
    fn vertices_only_mesh_renders_point_ids() {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, 1.0, -5.0),
            Vec3::new(0.0, 0.0, -5.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![]).unwrap();

        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &RenderConfig::default()).unwrap();
        let ids = decoded_ids(&bytes);
        for id in &ids {
            assert!(*id <= 3, "unexpected ID {id}");
        }
        for expected in 1..=3 {
            assert!(ids.contains(&expected), "vertex ID {expected} missing");
        }
    }

    #[test]
    fn point_size_grows_vertex_footprint() {
        let mesh = Mesh::new(vec![Vec3::new(0.0, 0.0, -5.0)], vec![], vec![]).unwrap();
        let config = RenderConfig {
            point_size: 3,
            ..Default::default()
        };
        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &config).unwrap();
        let covered = decoded_ids(&bytes).iter().filter(|&&id| id == 1).count();
        assert_eq!(covered, 9);
    }

    #[test]
    fn edge_ids_follow_face_ids() {
        // One face plus one standalone edge across the screen.
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -5.0),
            Vec3::new(1.0, -1.0, -5.0),
            Vec3::new(0.0, 1.0, -5.0),
            Vec3::new(-1.0, 1.5, -4.0),
            Vec3::new(1.0, 1.5, -4.0),
        ];
        let mesh = Mesh::new(vertices, vec![[3, 4]], vec![[0, 1, 2]]).unwrap();

        let bytes = render_id_map(&ortho_camera(), &mesh, W, H, &RenderConfig::default()).unwrap();
        let ids = decoded_ids(&bytes);
        assert!(ids.contains(&1), "face ID missing");
        assert!(ids.contains(&2), "edge ID missing");
    }

    #[test]
    fn depth_tie_favors_vertex_over_face() {
        // A vertex lying in the face's plane: equal depth at its pixel, but
        // vertices draw last and win the tie. The z = -4 plane maps to NDC
        // depth exactly 0.0 under these clip planes, so the tie is exact.
        let camera = Camera::new(
            Mat4::identity(),
            Mat4::orthographic(-2.0, 2.0, -2.0, 2.0, 2.0, 6.0),
        );
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -4.0),
            Vec3::new(1.0, -1.0, -4.0),
            Vec3::new(0.0, 1.0, -4.0),
            Vec3::new(0.2, -0.2, -4.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap();

        let bytes = render_id_map(&camera, &mesh, W, H, &RenderConfig::default()).unwrap();
        // Vertex IDs start after the single face: the in-plane vertex is
        // index 3, so ID 1 + 0 + 3 + 1 = 5.
        assert_eq!(decode_at(&bytes, 6, 6), 5);
        // Away from the vertex the face still owns the interior.
        assert_eq!(decode_at(&bytes, 5, 5), 1);
    }

    #[test]
    fn edge_grazing_the_eye_plane_is_clipped() {
        // One endpoint sits barely in front of the eye plane, so it passes
        // the behind-eye skip but projects billions of pixels off screen.
        // The render must finish and still draw the visible part of the edge.
        let camera = Camera::new(
            Mat4::identity(),
            Mat4::perspective(std::f64::consts::FRAC_PI_4, 1.0, 0.1, 100.0),
        );
        let vertices = vec![
            Vec3::new(-1.0, 0.0, -1.0e-9),
            Vec3::new(1.0, 0.0, -5.0),
        ];
        let mesh = Mesh::new(vertices, vec![[0, 1]], vec![]).unwrap();

        let bytes = render_id_map(&camera, &mesh, W, H, &RenderConfig::default()).unwrap();
        assert_eq!(bytes.len(), (3 * W * H) as usize);
        // The edge (ID 1, no faces in this mesh) crosses mid-screen.
        assert_eq!(decode_at(&bytes, 3, 5), 1);
    }

    #[test]
    fn every_visible_id_references_an_existing_primitive() {
        let mesh = Mesh::cube();
        let camera = Camera::look_at(
            Vec3::new(3.0, 2.5, 4.0),
            Vec3::ZERO,
            Vec3::new(0.0, 1.0, 0.0),
            Mat4::perspective(std::f64::consts::FRAC_PI_4, 1.0, 0.1, 100.0),
        );
        let bytes = render_id_map(&camera, &mesh, 64, 64, &RenderConfig::default()).unwrap();
        let mut seen_foreground = false;
        for px in bytes.chunks_exact(3) {
            let id = decode([px[0], px[1], px[2]]);
            if id == 0 {
                continue;
            }
            seen_foreground = true;
            assert!(
                mesh.primitive(id).is_some(),
                "decoded ID {id} does not exist in the mesh"
            );
        }
        assert!(seen_foreground);
    }

    #[test]
    fn shaded_output_brightens_under_frontal_light() {
        let mesh = front_triangle(-5.0);
        let camera = ortho_camera();

        // Lights at the camera position versus behind the triangle.
        let frontal = [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
        let behind = [Vec3::new(0.0, 0.0, -10.0); 3];

        let lit = render_shaded(&camera, &mesh, W, H, &frontal).unwrap();
        let unlit = render_shaded(&camera, &mesh, W, H, &behind).unwrap();

        let idx = ((5 * W + 5) * 3) as usize;
        assert!(lit[idx] > unlit[idx]);
        assert!(lit[idx + 1] > unlit[idx + 1]);
        assert!(lit[idx + 2] > unlit[idx + 2]);
        // Background stays white in both.
        assert_eq!(&lit[0..3], &[255, 255, 255]);
    }

    #[test]
    fn degenerate_face_is_skipped_in_shaded_mode() {
        // All three corners collinear: no normal, no pixels, no NaNs.
        let vertices = vec![
            Vec3::new(-1.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(1.0, 0.0, -5.0),
        ];
        let mesh = Mesh::new(vertices, vec![], vec![[0, 1, 2]]).unwrap();
        let shaded = render_shaded(
            &ortho_camera(),
            &mesh,
            W,
            H,
            &[Vec3::ZERO, Vec3::ZERO, Vec3::ZERO],
        )
        .unwrap();
        assert!(shaded.iter().all(|&b| b == 255));
    }

    #[test]
    fn zero_dimensions_are_rejected_before_rendering() {
        let mesh = Mesh::cube();
        let camera = ortho_camera();
        assert!(matches!(
            render_id_map(&camera, &mesh, 0, H, &RenderConfig::default()),
            Err(RenderError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            render_shaded(&camera, &mesh, W, 0, &[Vec3::ZERO; 3]),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn primitives_behind_the_camera_are_skipped() {
        // Triangle behind a perspective camera: nothing rendered, no panic.
        let camera = Camera::new(
            Mat4::identity(),
            Mat4::perspective(std::f64::consts::FRAC_PI_4, 1.0, 0.1, 100.0),
        );
        let mesh = front_triangle(5.0);
        let bytes = render_id_map(&camera, &mesh, W, H, &RenderConfig::default()).unwrap();
        assert!(decoded_ids(&bytes).iter().all(|&id| id == 0));
    }
}
