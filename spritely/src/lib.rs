//! A small 2D sprite and tile renderer built with WGPU.
//!
//! Spritely can be used two ways (not mutually exclusive):
//! 1. As a standalone rendering strategy: initialize a [`WGPU`] struct
//!    yourself with an adapter, device, and queue, and drive the built-in
//!    [`SpriteRenderer`] from your own renderpass.
//! 2. As a lightweight application layer (with the `winit` feature): call
//!    [`renderer::with_default_runtime()`] to set up windowing and the GPU,
//!    then use [`Clock`], the extension trait in [`RendererEvents`], and
//!    the [`input::Input`] struct to run a fixed-timestep loop.
//!
//! Sprites are drawn in groups; each group has a spritesheet texture, a
//! vector of [`Transform`]/[`SheetRegion`] pairs, and a [`Camera2D`].  On
//! top of that sit the domain helpers: [`sheet`] for frame-based
//! spritesheet animation, [`parallax`] for layered scrolling backgrounds,
//! and [`tiles`] for isometric diamond tile maps.
//!
//! Typical usage calls [`renderer::with_default_runtime()`], then
//! [`renderer::Renderer::sprite_group_add()`], and per frame
//! [`renderer::Renderer::sprites_mut()`] followed by
//! [`renderer::Renderer::render()`].

mod gpu;
pub use gpu::WGPU;
pub use wgpu;

mod sprites;
pub use sprites::{Camera2D, SheetRegion, SpriteRenderer, Transform};

pub mod renderer;
pub use renderer::*;

pub mod sheet;
pub use sheet::{AnimatedSprite, SpriteSheet};

pub mod parallax;
pub mod tiles;

pub use ultraviolet;

fn range<R: std::ops::RangeBounds<usize>>(r: R, hi: usize) -> std::ops::Range<usize> {
    let low = match r.start_bound() {
        std::ops::Bound::Included(&x) => x,
        std::ops::Bound::Excluded(&x) => x + 1,
        std::ops::Bound::Unbounded => 0,
    };
    let high = match r.end_bound() {
        std::ops::Bound::Included(&x) => x + 1,
        std::ops::Bound::Excluded(&x) => x,
        std::ops::Bound::Unbounded => hi,
    };
    low..high
}

#[cfg(feature = "winit")]
mod events;
#[cfg(feature = "winit")]
pub mod input;
#[cfg(feature = "winit")]
pub use events::*;

mod clock;
pub use clock::Clock;
pub use clock::Instant;
