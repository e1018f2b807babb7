//! The fixed three-point-light flat shading rig.
//!
//! Shaded mode exists for visual inspection of the mesh, so the lighting
//! model is deliberately rigid: a scene ambient term plus three positional
//! lights, each contributing classic Phong diffuse and specular terms, all
//! with hard-coded colors. Only the light positions vary per call.
//!
//! Evaluation happens in eye space with the viewer at the origin, once per
//! triangle using its flat normal (no interpolation).

use crate::math::vec3::Vec3;

/// Scene-wide ambient intensity.
const AMBIENT: f64 = 0.2;
/// Diffuse and specular color shared by all three lights.
const LIGHT_COLOR: f64 = 0.5;
/// Material diffuse and specular reflectance (an ochre tone).
const MATERIAL: [f64; 3] = [0.722, 0.494, 0.216];
/// Phong specular exponent.
const SHININESS: f64 = 20.0;

/// Evaluates the rig for one triangle.
///
/// # Arguments
/// * `point` - Eye-space evaluation point (the triangle centroid)
/// * `normal` - Unit flat normal in eye space
/// * `lights` - Eye-space positions of the three lights
///
/// Returns the shaded color with channels clamped to `[0, 255]`.
pub(crate) fn shade_flat(point: Vec3, normal: Vec3, lights: &[Vec3; 3]) -> [u8; 3] {
    // Viewer sits at the eye-space origin.
    let to_viewer = (-point).try_normalize().unwrap_or(Vec3::new(0.0, 0.0, 1.0));

    let mut diffuse_sum = 0.0;
    let mut specular_sum = 0.0;
    for light in lights {
        let to_light = match (*light - point).try_normalize() {
            Some(dir) => dir,
            None => continue, // light coincides with the surface point
        };
        let n_dot_l = normal.dot(to_light);
        if n_dot_l <= 0.0 {
            continue; // surface faces away from this light
        }
        diffuse_sum += LIGHT_COLOR * n_dot_l;

        // Classic Phong: reflect the light direction about the normal.
        let reflected = normal * (2.0 * n_dot_l) - to_light;
        let r_dot_v = reflected.dot(to_viewer).max(0.0);
        specular_sum += LIGHT_COLOR * r_dot_v.powf(SHININESS);
    }

    let mut out = [0u8; 3];
    for (channel, &reflectance) in out.iter_mut().zip(MATERIAL.iter()) {
        let value = reflectance * (AMBIENT + diffuse_sum + specular_sum);
        *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    out
}
