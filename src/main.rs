//! Demo binary: renders the built-in cube (or an OBJ file given as the
//! first argument) in both modes and writes `idmap.png` and `shaded.png`
//! to the current directory.
//!
//! The ID map looks nearly black to the eye because primitive IDs are
//! small; decode it with [`rastermap::decode`] rather than squinting.

use rastermap::math::mat4::Mat4;
use rastermap::math::vec3::Vec3;
use rastermap::{render_id_map, render_shaded, Camera, Mesh, RenderConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mesh = match std::env::args().nth(1) {
        Some(path) => Mesh::from_obj(&path)?,
        None => Mesh::cube(),
    };
    log::info!(
        "{} faces, {} edges, {} vertices ({} primitives)",
        mesh.faces().len(),
        mesh.edges().len(),
        mesh.vertices().len(),
        mesh.primitive_count()
    );

    let camera = Camera::look_at(
        Vec3::new(3.0, 2.5, 4.0),
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
        Mat4::perspective(45f64.to_radians(), 1.0, 0.1, 100.0),
    );
    let (width, height) = (512u32, 512u32);

    let id_map = render_id_map(&camera, &mesh, width, height, &RenderConfig::default())?;
    image::RgbImage::from_raw(width, height, id_map)
        .expect("buffer length matches dimensions")
        .save("idmap.png")?;

    let lights = [
        Vec3::new(4.0, 4.0, 4.0),
        Vec3::new(-4.0, 2.0, 4.0),
        Vec3::new(0.0, -4.0, 2.0),
    ];
    let shaded = render_shaded(&camera, &mesh, width, height, &lights)?;
    image::RgbImage::from_raw(width, height, shaded)
        .expect("buffer length matches dimensions")
        .save("shaded.png")?;

    println!("wrote idmap.png and shaded.png ({width}x{height})");
    Ok(())
}
