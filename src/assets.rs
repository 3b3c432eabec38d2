use std::path::PathBuf;

use bevy::prelude::*;
use image::{imageops::FilterType, GrayImage, RgbaImage};
use thiserror::Error;

// Loaded directly off the filesystem before the app starts, so the paths are
// relative to the working directory rather than the asset server root.
pub const HEIGHTMAP_PATH: &str = "assets/terrain/heightmap.png";
pub const TERRAIN_DIFFUSE_PATH: &str = "assets/terrain/diffuse.png";
pub const RUNWAY_DIFFUSE_PATH: &str = "assets/runway/diffuse.png";

/// Asset-server path of the looping engine sound. This load is unchecked: a
/// missing file degrades to silence.
pub const ENGINE_SOUND_PATH: &str = "audio/engine.ogg";

/// Saturation boost baked into the terrain diffuse texture at load.
pub const SATURATION_BOOST: f32 = 3.0;

/// The heightmap is meshed one vertex per pixel, so it is shrunk by this
/// factor per side to keep the terrain mesh small.
const HEIGHTMAP_DOWNSAMPLE: u32 = 3;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to load heightmap {path}: {source}")]
    Heightmap {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to load terrain texture {path}: {source}")]
    TerrainTexture {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to load runway texture {path}: {source}")]
    RunwayTexture {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// CPU-side images for the static world geometry. These three loads are the
/// only checked failure sites in the program; everything else (plane scene,
/// engine sound) degrades silently.
#[derive(Resource)]
pub struct WorldImages {
    pub heightmap: GrayImage,
    pub terrain_diffuse: RgbaImage,
    pub runway_diffuse: RgbaImage,
}

impl WorldImages {
    pub fn load() -> Result<Self, AssetError> {
        let heightmap = image::open(HEIGHTMAP_PATH).map_err(|source| AssetError::Heightmap {
            path: HEIGHTMAP_PATH.into(),
            source,
        })?;
        let width = (heightmap.width() / HEIGHTMAP_DOWNSAMPLE).max(2);
        let height = (heightmap.height() / HEIGHTMAP_DOWNSAMPLE).max(2);
        let heightmap = heightmap
            .resize_exact(width, height, FilterType::Triangle)
            .to_luma8();

        let terrain_diffuse =
            image::open(TERRAIN_DIFFUSE_PATH).map_err(|source| AssetError::TerrainTexture {
                path: TERRAIN_DIFFUSE_PATH.into(),
                source,
            })?;
        let terrain_diffuse = saturate(terrain_diffuse.to_rgba8(), SATURATION_BOOST);

        let runway_diffuse = image::open(RUNWAY_DIFFUSE_PATH)
            .map_err(|source| AssetError::RunwayTexture {
                path: RUNWAY_DIFFUSE_PATH.into(),
                source,
            })?
            .to_rgba8();

        Ok(Self {
            heightmap,
            terrain_diffuse,
            runway_diffuse,
        })
    }
}

/// Per-pixel `mix(gray, color, factor)`. Factor 1.0 is the identity; larger
/// values push the channels away from the luma.
pub fn saturate(mut image: RgbaImage, factor: f32) -> RgbaImage {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        );
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;
        let boost = |c: f32| ((gray + (c - gray) * factor).clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel.0 = [boost(r), boost(g), boost(b), a];
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn saturate_factor_one_is_identity() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([200, 40, 90, 255]));
        image.put_pixel(1, 1, Rgba([0, 255, 128, 128]));

        let out = saturate(image.clone(), 1.0);
        assert_eq!(out, image);
    }

    #[test]
    fn saturate_leaves_gray_pixels_alone() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([128, 128, 128, 255]));

        let out = saturate(image, SATURATION_BOOST);
        assert_eq!(out.get_pixel(0, 0).0, [128, 128, 128, 255]);
    }

    #[test]
    fn saturate_clamps_to_channel_range() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        let out = saturate(image, 10.0);
        let [r, g, b, a] = out.get_pixel(0, 0).0;
        assert_eq!(r, 255);
        assert_eq!(g, 0);
        assert_eq!(b, 0);
        assert_eq!(a, 255);
    }

    #[test]
    fn errors_name_the_failing_file() {
        let err = AssetError::Heightmap {
            path: HEIGHTMAP_PATH.into(),
            source: image::ImageError::IoError(std::io::Error::from(
                std::io::ErrorKind::NotFound,
            )),
        };
        assert!(err.to_string().contains(HEIGHTMAP_PATH));
    }

    #[test]
    fn bundled_world_images_load() {
        let images = WorldImages::load().expect("bundled assets should decode");
        assert!(images.heightmap.width() >= 2);
        assert!(images.heightmap.height() >= 2);
    }
}
