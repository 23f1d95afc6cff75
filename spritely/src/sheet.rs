//! Frame-based spritesheet animation: a [`SpriteSheet`] describes a
//! grid of animation rows and frame columns, and an
//! [`AnimatedSprite`] walks that grid on a timer and produces
//! [`Transform`]/[`SheetRegion`] instance data for a sprite group.

use crate::sprites::{SheetRegion, Transform};
use ultraviolet::Vec2;

/// The grid geometry of a spritesheet: `animations` rows of `frames`
/// columns, evenly dividing the texture.  Row 0, column 0 is the top
/// left cell.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSheet {
    cell_w: u16,
    cell_h: u16,
    animations: u16,
    frames: u16,
}

impl SpriteSheet {
    pub fn new(sheet_w: u16, sheet_h: u16, animations: u16, frames: u16) -> Self {
        assert!(
            animations > 0 && frames > 0,
            "A spritesheet needs at least one animation row and one frame column"
        );
        Self {
            cell_w: sheet_w / frames,
            cell_h: sheet_h / animations,
            animations,
            frames,
        }
    }
    /// The sheet cell for the given animation row and frame column.
    pub fn region(&self, animation: u16, frame: u16) -> SheetRegion {
        SheetRegion::new(
            frame * self.cell_w,
            animation * self.cell_h,
            0,
            self.cell_w,
            self.cell_h,
        )
    }
    pub fn animations(&self) -> u16 {
        self.animations
    }
    pub fn frames(&self) -> u16 {
        self.frames
    }
    pub fn cell_size(&self) -> (u16, u16) {
        (self.cell_w, self.cell_h)
    }
}

/// A sprite whose sheet region advances through an animation row on a
/// fixed per-frame duration.
pub struct AnimatedSprite {
    sheet: SpriteSheet,
    pub pos: Vec2,
    pub size: Vec2,
    pub rot: f32,
    pub depth: u16,
    animation: u16,
    frame: u16,
    timer: f32,
    frame_time: f32,
}

impl AnimatedSprite {
    /// Creates a sprite showing frame 0 of animation 0, sized to one
    /// sheet cell, positioned at the origin.
    pub fn new(sheet: SpriteSheet, frame_time: f32) -> Self {
        assert!(frame_time > 0.0, "Frame duration must be positive");
        let (cell_w, cell_h) = sheet.cell_size();
        Self {
            sheet,
            pos: Vec2::zero(),
            size: Vec2::new(cell_w as f32, cell_h as f32),
            rot: 0.0,
            depth: 0,
            animation: 0,
            frame: 0,
            timer: 0.0,
            frame_time,
        }
    }
    /// Advance the animation timer by `dt` seconds, moving to the
    /// next frame (wrapping around the row) each time a full frame
    /// duration has accumulated.  Leftover time is kept, not
    /// discarded, so irregular tick sizes don't slow the animation.
    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        while self.timer >= self.frame_time {
            self.timer -= self.frame_time;
            self.frame = (self.frame + 1) % self.sheet.frames();
        }
    }
    /// Switch to the given animation row and rewind to its first
    /// frame.  Out-of-range rows are ignored.
    pub fn set_animation(&mut self, animation: u16) {
        if animation < self.sheet.animations() {
            self.animation = animation;
            self.frame = 0;
        }
    }
    pub fn animation(&self) -> u16 {
        self.animation
    }
    pub fn frame(&self) -> u16 {
        self.frame
    }
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }
    /// The world-space destination of this sprite.
    pub fn transform(&self) -> Transform {
        Transform {
            w: self.size.x as u16,
            h: self.size.y as u16,
            x: self.pos.x,
            y: self.pos.y,
            rot: self.rot,
        }
    }
    /// The sheet cell of the current animation frame.
    pub fn region(&self) -> SheetRegion {
        self.sheet.region(self.animation, self.frame).with_depth(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker() -> AnimatedSprite {
        // 6 frames of 32x32 across, 4 animation rows down
        AnimatedSprite::new(SpriteSheet::new(192, 128, 4, 6), 0.1)
    }

    #[test]
    fn regions_walk_the_grid() {
        let sheet = SpriteSheet::new(192, 128, 4, 6);
        assert_eq!(sheet.cell_size(), (32, 32));
        let r = sheet.region(0, 0);
        assert_eq!((r.x, r.y, r.w, r.h), (0, 0, 32, 32));
        let r = sheet.region(2, 3);
        assert_eq!((r.x, r.y, r.w, r.h), (96, 64, 32, 32));
    }

    #[test]
    fn frames_advance_on_the_timer_and_wrap() {
        let mut spr = walker();
        spr.tick(0.05);
        assert_eq!(spr.frame(), 0);
        spr.tick(0.05);
        assert_eq!(spr.frame(), 1);
        // one big tick advances several frames and keeps the remainder
        spr.tick(0.25);
        assert_eq!(spr.frame(), 3);
        spr.tick(0.3);
        assert_eq!(spr.frame(), 0);
    }

    #[test]
    fn set_animation_rewinds_and_checks_bounds() {
        let mut spr = walker();
        spr.tick(0.35);
        assert_eq!(spr.frame(), 3);
        spr.set_animation(2);
        assert_eq!(spr.animation(), 2);
        assert_eq!(spr.frame(), 0);
        // out of range: ignored
        spr.set_animation(9);
        assert_eq!(spr.animation(), 2);
    }

    #[test]
    fn region_carries_depth() {
        let mut spr = walker();
        spr.depth = 500;
        spr.set_animation(1);
        let r = spr.region();
        assert_eq!((r.x, r.y), (0, 32));
        assert_eq!(r.depth, 500);
    }
}
