//! A scrolling background composited from horizontally tiling layers,
//! each moving at its own fraction of the camera's speed.

use crate::sprites::{Camera2D, SheetRegion, Transform};
use ultraviolet::Vec2;

/// One strip of the background.  `factor` sets how fast the strip
/// scrolls relative to the camera: 0 keeps it pinned to the camera
/// (distant sky), 1 moves it with the world (foreground).
#[derive(Clone, Copy, Debug)]
pub struct ParallaxLayer {
    /// The strip's cell in the background spritesheet.
    pub region: SheetRegion,
    pub factor: f32,
    /// Layering depth; farther strips should use larger values.
    pub depth: u16,
    /// World-space y of the strip's center.
    pub y: f32,
}

/// A stack of [`ParallaxLayer`]s.  Every layer is drawn as two
/// side-by-side copies placed on a lattice of `layer_size.x`-wide
/// slots, so some pair always covers the viewport no matter how far
/// the camera has scrolled.
pub struct Parallax {
    layers: Vec<ParallaxLayer>,
    layer_size: Vec2,
}

impl Parallax {
    /// `layer_size` is the world-space size of one copy of a strip;
    /// its width must be at least the camera's width or gaps will
    /// show at the seam.
    pub fn new(layers: Vec<ParallaxLayer>, layer_size: Vec2) -> Self {
        assert!(
            layer_size.x > 0.0 && layer_size.y > 0.0,
            "Parallax layers need a positive world size"
        );
        Self { layers, layer_size }
    }
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
    /// How many sprites [`Parallax::fill`] writes: two per layer.
    pub fn sprite_count(&self) -> usize {
        self.layers.len() * 2
    }
    /// Write the layers' instance data into a sprite group's slices,
    /// positioned for the given camera.  The slices must hold at
    /// least [`Parallax::sprite_count`] sprites.
    pub fn fill(&self, camera: &Camera2D, trfs: &mut [Transform], uvs: &mut [SheetRegion]) {
        assert!(
            trfs.len() >= self.sprite_count() && uvs.len() >= self.sprite_count(),
            "Sprite group is too small for this background"
        );
        let w = self.layer_size.x;
        let cam_x = camera.screen_pos[0];
        for (i, layer) in self.layers.iter().enumerate() {
            // A layer's pattern scrolls at `factor` of the camera,
            // i.e. its world-space anchor drifts by the rest.
            let anchor = cam_x * (1.0 - layer.factor);
            // leftmost lattice slot still covering the camera's left edge
            let base = anchor + ((cam_x - anchor) / w).floor() * w;
            for k in 0..2 {
                let slot = i * 2 + k;
                trfs[slot] = Transform {
                    w: w as u16,
                    h: self.layer_size.y as u16,
                    x: base + (k as f32 + 0.5) * w,
                    y: layer.y,
                    rot: 0.0,
                };
                uvs[slot] = layer.region.with_depth(layer.depth);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn background() -> Parallax {
        Parallax::new(
            vec![
                ParallaxLayer {
                    region: SheetRegion::new(0, 0, 0, 512, 384),
                    factor: 0.0,
                    depth: 60000,
                    y: 192.0,
                },
                ParallaxLayer {
                    region: SheetRegion::new(0, 384, 0, 512, 384),
                    factor: 0.5,
                    depth: 30000,
                    y: 192.0,
                },
                ParallaxLayer {
                    region: SheetRegion::new(0, 768, 0, 512, 384),
                    factor: 1.0,
                    depth: 1000,
                    y: 192.0,
                },
            ],
            Vec2::new(512.0, 384.0),
        )
    }

    fn camera_at(x: f32) -> Camera2D {
        Camera2D {
            screen_pos: [x, 0.0],
            screen_size: [512.0, 384.0],
        }
    }

    fn fill_at(bg: &Parallax, x: f32) -> (Vec<Transform>, Vec<SheetRegion>) {
        let mut trfs = vec![Transform::default(); bg.sprite_count()];
        let mut uvs = vec![SheetRegion::default(); bg.sprite_count()];
        bg.fill(&camera_at(x), &mut trfs, &mut uvs);
        (trfs, uvs)
    }

    #[test]
    fn every_layer_covers_the_viewport() {
        let bg = background();
        for cam_x in [-1300.0, -512.0, -1.0, 0.0, 17.5, 511.0, 512.0, 9000.25] {
            let (trfs, _) = fill_at(&bg, cam_x);
            for layer in trfs.chunks(2) {
                let left = layer
                    .iter()
                    .map(|t| t.x - t.w as f32 / 2.0)
                    .fold(f32::INFINITY, f32::min);
                let right = layer
                    .iter()
                    .map(|t| t.x + t.w as f32 / 2.0)
                    .fold(f32::NEG_INFINITY, f32::max);
                assert!(left <= cam_x, "gap at left edge for camera {cam_x}");
                assert!(right >= cam_x + 512.0, "gap at right edge for camera {cam_x}");
            }
        }
    }

    #[test]
    fn factor_zero_rides_the_camera() {
        let bg = background();
        let (near, _) = fill_at(&bg, 100.0);
        let (far, _) = fill_at(&bg, 5000.0);
        // sky layer keeps the same screen-space position
        assert_eq!(near[0].x - 100.0, far[0].x - 5000.0);
    }

    #[test]
    fn factor_one_stays_in_the_world() {
        let bg = background();
        let (a, _) = fill_at(&bg, 100.0);
        let (b, _) = fill_at(&bg, 300.0);
        // foreground slots are on a fixed world lattice
        assert_eq!(a[4].x % 512.0, b[4].x % 512.0);
    }

    #[test]
    fn layers_keep_their_depth_and_cell() {
        let bg = background();
        let (_, uvs) = fill_at(&bg, 42.0);
        assert_eq!(uvs[0].depth, 60000);
        assert_eq!(uvs[2].y, 384);
        assert_eq!(uvs[5].depth, 1000);
    }
}
