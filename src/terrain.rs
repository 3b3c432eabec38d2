use bevy::{
    prelude::*,
    render::{mesh::Indices, render_asset::RenderAssetUsages, render_resource::PrimitiveTopology},
};
use image::GrayImage;

/// Extent of the terrain mesh: X/Z footprint and the height of a pure-white
/// heightmap pixel.
pub const TERRAIN_SIZE: Vec3 = Vec3::new(1000.0, 350.0, 1000.0);
pub const TERRAIN_ORIGIN: Vec3 = Vec3::new(-50.0, 0.0, -50.0);

/// Runway quad, width by length.
pub const RUNWAY_SIZE: Vec2 = Vec2::new(6.0, 22.0);
pub const RUNWAY_POSITION: Vec3 = Vec3::new(95.0, 27.458, 15.0);

/// Touching down is being within this distance of the landing spot.
pub const LANDING_SPOT: Vec3 = Vec3::new(100.0, 27.458, 1.0);
pub const LANDING_THRESHOLD: f32 = 5.0;

/// Builds a triangle grid from a grayscale heightmap, one vertex per pixel.
/// The mesh spans `[0, size.x] × [0, size.z]` from its local origin with
/// heights scaled so a full-white pixel sits at `size.y`.
pub fn heightmap_mesh(heightmap: &GrayImage, size: Vec3) -> Mesh {
    let (width, height) = heightmap.dimensions();
    debug_assert!(width >= 2 && height >= 2);
    let (w, h) = (width as usize, height as usize);

    let cell_x = size.x / (w - 1) as f32;
    let cell_z = size.z / (h - 1) as f32;
    let height_at =
        |x: usize, z: usize| f32::from(heightmap.get_pixel(x as u32, z as u32).0[0]) / 255.0 * size.y;

    let mut positions = Vec::with_capacity(w * h);
    let mut normals = Vec::with_capacity(w * h);
    let mut uvs = Vec::with_capacity(w * h);

    for z in 0..h {
        for x in 0..w {
            positions.push([x as f32 * cell_x, height_at(x, z), z as f32 * cell_z]);
            uvs.push([x as f32 / (w - 1) as f32, z as f32 / (h - 1) as f32]);

            // Central differences, shortened to one cell at the edges.
            let dx = height_at(x.saturating_sub(1), z) - height_at((x + 1).min(w - 1), z);
            let dz = height_at(x, z.saturating_sub(1)) - height_at(x, (z + 1).min(h - 1));
            let normal = Vec3::new(dx, 2.0 * cell_x.max(cell_z), dz).normalize();
            normals.push([normal.x, normal.y, normal.z]);
        }
    }

    let mut indices = Vec::with_capacity((w - 1) * (h - 1) * 6);
    for z in 0..h - 1 {
        for x in 0..w - 1 {
            let i = (z * w + x) as u32;
            let w = w as u32;
            indices.extend_from_slice(&[i, i + w, i + 1, i + 1, i + w, i + w + 1]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}
