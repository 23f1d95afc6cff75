//! [`Renderer`] is the main user-facing type of this crate.  You can
//! make one using [`with_default_runtime()`] or, if you don't need
//! spritely to initialize `wgpu` and a window for you, use
//! [`Renderer::with_gpu`] to construct a renderer with a given
//! [`crate::gpu::WGPU`] struct, dimensions, and surface.

use crate::{sprites::SpriteRenderer, WGPU};
use std::ops::{Range, RangeBounds};

/// A wrapper over GPU state, a surface, a depth texture, and the
/// sprite renderer.
pub struct Renderer {
    pub gpu: WGPU,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: wgpu::Texture,
    depth_texture_view: wgpu::TextureView,
    // Tracked for auto uploading of sprite data.  You can also drive
    // the sprite renderer directly for more control.
    sprites: SpriteRenderer,
    queued_uploads: Vec<(usize, Range<usize>)>,
}

/// Initialize spritely with default settings: a winit event loop and
/// window, logging via `env_logger`, and a WGPU device compatible
/// with the window's surface.  The renderer and window are handed to
/// `callback` along with the event loop to run.
#[cfg(feature = "winit")]
pub fn with_default_runtime(
    builder: winit::window::WindowBuilder,
    callback: impl FnOnce(
        winit::event_loop::EventLoop<()>,
        std::sync::Arc<winit::window::Window>,
        Renderer,
    ),
) -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Arc;

    let event_loop = winit::event_loop::EventLoop::new()?;
    let window = Arc::new(builder.build(&event_loop)?);

    env_logger::init();
    let wsz = window.inner_size();
    let instance = Arc::new(wgpu::Instance::default());
    let surface = instance.create_surface(window.clone())?;
    let gpu = pollster::block_on(WGPU::new(instance, Some(&surface)))?;
    callback(
        event_loop,
        window,
        Renderer::with_gpu(wsz.width, wsz.height, gpu, surface),
    );
    Ok(())
}

impl Renderer {
    /// The format used for depth textures within spritely.
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Create a new Renderer with a full set of GPU resources, a
    /// size, and a surface.
    pub fn with_gpu(
        width: u32,
        height: u32,
        gpu: crate::gpu::WGPU,
        surface: wgpu::Surface<'static>,
    ) -> Self {
        let width = if width == 0 { 320 } else { width };
        let height = if height == 0 { 240 } else { height };
        let swapchain_capabilities = surface.get_capabilities(gpu.adapter());
        let swapchain_format = swapchain_capabilities.formats[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: swapchain_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: swapchain_capabilities.alpha_modes[0],
            view_formats: vec![swapchain_format],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &config);

        let (depth_texture, depth_texture_view) =
            Self::create_depth_texture(gpu.device(), width, height);

        let color_target = wgpu::ColorTargetState {
            format: swapchain_format,
            blend: Some(wgpu::BlendState {
                color: wgpu::BlendComponent::OVER,
                alpha: wgpu::BlendComponent::OVER,
            }),
            write_mask: wgpu::ColorWrites::ALL,
        };
        let sprites = SpriteRenderer::new(&gpu, color_target, Self::DEPTH_FORMAT);
        Self {
            gpu,
            surface,
            config,
            depth_texture,
            depth_texture_view,
            sprites,
            queued_uploads: Vec::with_capacity(16),
        }
    }
    /// Resize the surface and depth texture (typically called when
    /// the window size changes).
    pub fn resize_surface(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(self.gpu.device(), &self.config);
        let (depth_texture, depth_texture_view) =
            Self::create_depth_texture(self.gpu.device(), w, h);
        self.depth_texture = depth_texture;
        self.depth_texture_view = depth_texture_view;
    }
    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let desc = wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Uploads sprite data accessed since the last time [`Renderer::do_uploads`]
    /// was called.  Call this manually if you want, or let
    /// [`Renderer::render`] call it automatically.
    pub fn do_uploads(&mut self) {
        for (group, range) in self.queued_uploads.drain(..) {
            log::info!("upload: group {group} {range:?}");
            self.sprites.upload_sprites(&self.gpu, group, range);
        }
    }

    /// Acquire the next frame, create a [`wgpu::RenderPass`], draw
    /// all sprite groups into it, and submit the encoder.  This also
    /// performs queued uploads of sprite data.
    pub fn render(&mut self) {
        self.do_uploads();
        let (frame, view, mut encoder) = self.render_setup();
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            self.render_into(&mut rpass);
        }
        self.render_finish(frame, encoder);
    }
    /// Renders all the sprite groups into a given
    /// [`wgpu::RenderPass`], with no encoder submission or frame
    /// acquire/present.
    pub fn render_into<'s, 'pass>(&'s self, rpass: &mut wgpu::RenderPass<'pass>)
    where
        's: 'pass,
    {
        self.sprites.render(rpass, ..);
    }
    /// Convenience method for acquiring a surface texture, view, and
    /// command encoder.
    pub fn render_setup(
        &self,
    ) -> (
        wgpu::SurfaceTexture,
        wgpu::TextureView,
        wgpu::CommandEncoder,
    ) {
        let frame = self
            .surface
            .get_current_texture()
            .expect("Failed to acquire next swap chain texture");
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.config.view_formats[0]),
            ..Default::default()
        });
        let encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });
        (frame, view, encoder)
    }
    /// Convenience method for submitting a command encoder and
    /// presenting the swapchain image.
    pub fn render_finish(&self, frame: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.gpu.queue().submit(Some(encoder.finish()));
        frame.present();
    }
    /// Creates a single 2D texture on the renderer's GPU and fills it
    /// with `image`, which must be `4 * width * height` bytes.
    pub fn create_texture(
        &self,
        image: &[u8],
        format: wgpu::TextureFormat,
        (width, height): (u32, u32),
        label: Option<&str>,
    ) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.gpu.queue().write_texture(
            texture.as_image_copy(),
            image,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        texture
    }

    /// Create a new sprite group sized to fit `world_transforms` and
    /// `sheet_regions`, which must be the same length.  Returns the
    /// sprite group index corresponding to this group.
    pub fn sprite_group_add(
        &mut self,
        tex: &wgpu::Texture,
        world_transforms: Vec<crate::sprites::Transform>,
        sheet_regions: Vec<crate::sprites::SheetRegion>,
        camera: crate::sprites::Camera2D,
    ) -> usize {
        self.sprites
            .add_sprite_group(&self.gpu, tex, world_transforms, sheet_regions, camera)
    }
    /// Returns the number of sprite groups.
    pub fn sprite_group_count(&self) -> usize {
        self.sprites.sprite_group_count()
    }
    /// Deletes a sprite group; see [`SpriteRenderer::remove_sprite_group`].
    pub fn sprite_group_remove(&mut self, which: usize) {
        self.sprites.remove_sprite_group(which)
    }
    /// Reports the size of the given sprite group.  Panics if the given sprite group is not populated.
    pub fn sprite_group_size(&self, which: usize) -> usize {
        self.sprites.sprite_group_size(which)
    }
    /// Resizes a sprite group; see [`SpriteRenderer::resize_sprite_group`].
    ///
    /// Panics if the given sprite group is not populated.
    pub fn sprite_group_resize(&mut self, which: usize, len: usize) -> usize {
        self.sprites.resize_sprite_group(&self.gpu, which, len)
    }
    /// Set the given camera transform on a specific sprite group.  Uploads to the GPU.
    /// Panics if the given sprite group is not populated.
    pub fn sprite_group_set_camera(&mut self, which: usize, camera: crate::sprites::Camera2D) {
        self.sprites.set_camera(&self.gpu, which, camera)
    }
    /// Get a mutable slice of a specified sprite group's world
    /// transforms and sheet regions, marking that range for upload at
    /// the next [`Renderer::render`].  Since this causes an upload later on,
    /// call it as few times as possible per frame, and avoid calling
    /// it with lots of tiny or overlapped ranges.
    ///
    /// Panics if the given sprite group is not populated or the range is out of bounds.
    pub fn sprites_mut(
        &mut self,
        which: usize,
        range: impl RangeBounds<usize>,
    ) -> (
        &mut [crate::sprites::Transform],
        &mut [crate::sprites::SheetRegion],
    ) {
        let count = self.sprite_group_size(which);
        let range = crate::range(range, count);
        self.queued_uploads.push((which, range.clone()));
        let (trfs, uvs) = self.sprites.get_sprites_mut(which);
        (&mut trfs[range.clone()], &mut uvs[range])
    }
    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }
    pub fn depth_texture(&self) -> &wgpu::Texture {
        &self.depth_texture
    }
    pub fn depth_texture_view(&self) -> &wgpu::TextureView {
        &self.depth_texture_view
    }
}
