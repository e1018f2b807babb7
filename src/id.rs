//! Bijective mapping between primitive IDs and 24-bit RGB triplets.
//!
//! Primitive IDs are 1-based and global across the mesh: faces come first,
//! then edges, then vertices. ID 0 is reserved for the background, which is
//! why the framebuffer clears to black in ID-map mode.
//!
//! The byte order is big-endian and is the authoritative contract: the red
//! channel carries the high bits. Both directions use the same convention,
//! so `decode(encode(id)) == id` holds for every ID the color depth can
//! represent.

/// The largest encodable primitive ID (2^24 - 1).
///
/// A mesh whose total primitive count exceeds this cannot be rendered into
/// an ID map without two primitives aliasing to the same color; [`crate::Mesh`]
/// rejects such meshes at construction.
pub const MAX_ID: u32 = (1 << 24) - 1;

/// Encodes a primitive ID into an RGB triplet, high bits in red.
///
/// # Panics
/// Panics if `id` exceeds [`MAX_ID`]. Mesh validation guarantees rendered
/// IDs stay in range, so hitting this indicates a caller bug rather than a
/// data-dependent condition worth recovering from.
#[inline]
pub fn encode(id: u32) -> [u8; 3] {
    assert!(id <= MAX_ID, "primitive ID {id} exceeds the 24-bit ID space");
    [(id >> 16) as u8, (id >> 8) as u8, id as u8]
}

/// Decodes an RGB triplet back into a primitive ID. Exact inverse of
/// [`encode`].
#[inline]
pub fn decode(rgb: [u8; 3]) -> u32 {
    ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32
}

/// The identity of a mesh primitive recovered from a decoded pixel.
///
/// Indices are 0-based positions within the mesh's face, edge, and vertex
/// arrays. Obtained via [`crate::Mesh::primitive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Face(usize),
    Edge(usize),
    Vertex(usize),
}
