//! A sprite renderer with multiple layers ("sprite groups") which can
//! be independently transformed.

use std::{borrow::Cow, ops::RangeBounds};

use crate::WGPU;
use bytemuck::{Pod, Zeroable};

/// A Transform describes the destination of a sprite blit: a `w` by
/// `h` rectangle centered at `(x, y)` in world coordinates, rotated
/// by `rot` radians about its own center.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable, Pod)]
pub struct Transform {
    pub w: u16,
    pub h: u16,
    pub x: f32,
    pub y: f32,
    pub rot: f32,
}

/// A SheetRegion describes the source of a sprite blit: a rectangle
/// of the group's spritesheet in texel coordinates, along with a
/// `depth` used for layering (0 is frontmost, `u16::MAX` rearmost).
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Default, Zeroable, Pod)]
pub struct SheetRegion {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
    pub depth: u16,
    pad: u16,
}

impl SheetRegion {
    pub const fn new(x: u16, y: u16, depth: u16, w: u16, h: u16) -> Self {
        Self {
            x,
            y,
            w,
            h,
            depth,
            pad: 0,
        }
    }
    /// The same region with a different layering depth.
    pub const fn with_depth(self, depth: u16) -> Self {
        Self {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            depth,
            pad: self.pad,
        }
    }
}

/// Camera2D is a transform for a sprite layer, defining the
/// world-space rectangle that fills the viewport.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug, Zeroable, Pod)]
pub struct Camera2D {
    pub screen_pos: [f32; 2],
    pub screen_size: [f32; 2],
}

struct SpriteGroup {
    world_buffer: wgpu::Buffer,
    sheet_buffer: wgpu::Buffer,
    world_transforms: Vec<Transform>,
    sheet_regions: Vec<SheetRegion>,
    camera: Camera2D,
    camera_buffer: wgpu::Buffer,
    tex_bind_group: wgpu::BindGroup,
    camera_bind_group: wgpu::BindGroup,
}

/// SpriteRenderer hosts a number of sprite layers (called groups).
/// Each group has a spritesheet texture, a vector of [`Transform`]
/// and [`SheetRegion`] instance data, and a [`Camera2D`] to define
/// its view transform.
pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    groups: Vec<SpriteGroup>,
}

impl SpriteRenderer {
    /// Create a sprite renderer drawing to targets of the given color
    /// and depth formats.
    pub fn new(
        gpu: &WGPU,
        color_target: wgpu::ColorTargetState,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: None,
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("sprites.wgsl"))),
            });

        let texture_bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: None,
                    entries: &[
                        // The texture binding; visible in the vertex
                        // shader too since UVs are normalized there
                        // with textureDimensions.
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        // The sampler binding
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });
        let camera_bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: None,
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });
        let pipeline_layout =
            gpu.device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: None,
                    bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let pipeline = gpu
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: None,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: "vs_main",
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<Transform>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &[
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Uint16x2,
                                    offset: 0,
                                    shader_location: 0,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Float32x3,
                                    offset: std::mem::size_of::<[u16; 2]>() as u64,
                                    shader_location: 1,
                                },
                            ],
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<SheetRegion>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &[
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Uint16x4,
                                    offset: 0,
                                    shader_location: 2,
                                },
                                wgpu::VertexAttribute {
                                    format: wgpu::VertexFormat::Uint16x2,
                                    offset: std::mem::size_of::<[u16; 4]>() as u64,
                                    shader_location: 3,
                                },
                            ],
                        },
                    ],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: "fs_main",
                    targets: &[Some(color_target)],
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        Self {
            pipeline,
            groups: Vec::default(),
            camera_bind_group_layout,
            texture_bind_group_layout,
        }
    }
    /// Create a new sprite group sized to fit `world_transforms` and
    /// `sheet_regions`, which must be the same length.  Returns a
    /// sprite group handle (for now, a usize).
    pub fn add_sprite_group(
        &mut self,
        gpu: &WGPU,
        tex: &wgpu::Texture,
        world_transforms: Vec<Transform>,
        sheet_regions: Vec<SheetRegion>,
        camera: Camera2D,
    ) -> usize {
        assert_eq!(
            world_transforms.len(),
            sheet_regions.len(),
            "Every sprite in a group needs both a transform and a sheet region"
        );
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = gpu
            .device()
            .create_sampler(&wgpu::SamplerDescriptor::default());
        let tex_bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        let world_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: None,
            size: world_transforms.len() as u64 * std::mem::size_of::<Transform>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sheet_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: None,
            size: sheet_regions.len() as u64 * std::mem::size_of::<SheetRegion>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: None,
            size: std::mem::size_of::<Camera2D>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &self.camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });
        gpu.queue()
            .write_buffer(&world_buffer, 0, bytemuck::cast_slice(&world_transforms));
        gpu.queue()
            .write_buffer(&sheet_buffer, 0, bytemuck::cast_slice(&sheet_regions));
        gpu.queue()
            .write_buffer(&camera_buffer, 0, bytemuck::bytes_of(&camera));
        self.groups.push(SpriteGroup {
            world_buffer,
            sheet_buffer,
            world_transforms,
            sheet_regions,
            camera,
            camera_buffer,
            tex_bind_group,
            camera_bind_group,
        });
        self.groups.len() - 1
    }
    /// Returns the number of sprite groups.
    pub fn sprite_group_count(&self) -> usize {
        self.groups.len()
    }
    /// Reports the size of the given sprite group.
    pub fn sprite_group_size(&self, which: usize) -> usize {
        self.groups[which].world_transforms.len()
    }
    /// Deletes a sprite group.  Note that this currently invalidates
    /// all the old handles, which is not great.  Only use it on the
    /// last sprite group if that matters to you.
    pub fn remove_sprite_group(&mut self, which: usize) {
        self.groups.remove(which);
    }
    /// Resizes a sprite group.  If the new size is smaller, this is
    /// very cheap; if it's larger than it's ever been before, it
    /// might involve reallocating the instance vectors or the GPU
    /// buffers used to draw sprites, so it could be expensive.
    pub fn resize_sprite_group(&mut self, gpu: &WGPU, which: usize, len: usize) -> usize {
        let group = &mut self.groups[which];
        let old_len = group.world_transforms.len();
        group.world_transforms.resize(len, Transform::zeroed());
        group.sheet_regions.resize(len, SheetRegion::zeroed());
        // realloc buffers if needed
        let world_size = len * std::mem::size_of::<Transform>();
        if world_size > group.world_buffer.size() as usize {
            group.world_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
                label: None,
                size: world_size as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            group.sheet_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
                label: None,
                size: (len * std::mem::size_of::<SheetRegion>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            gpu.queue().write_buffer(
                &group.world_buffer,
                0,
                bytemuck::cast_slice(&group.world_transforms),
            );
            gpu.queue().write_buffer(
                &group.sheet_buffer,
                0,
                bytemuck::cast_slice(&group.sheet_regions),
            );
        }
        old_len
    }
    /// Set the given camera transform on all sprite groups.  Uploads to the GPU.
    pub fn set_camera_all(&mut self, gpu: &WGPU, camera: Camera2D) {
        for sg_index in 0..self.groups.len() {
            self.set_camera(gpu, sg_index, camera);
        }
    }
    /// Set the given camera transform on a specific sprite group.  Uploads to the GPU.
    pub fn set_camera(&mut self, gpu: &WGPU, which: usize, camera: Camera2D) {
        let sg = &mut self.groups[which];
        sg.camera = camera;
        gpu.queue()
            .write_buffer(&sg.camera_buffer, 0, bytemuck::bytes_of(&sg.camera));
    }
    /// Send a range of stored sprite data for a particular group to the GPU.
    /// You must call this yourself after modifying sprite data, or
    /// use [`crate::renderer::Renderer::sprites_mut`] which does it for you.
    pub fn upload_sprites(&mut self, gpu: &WGPU, which: usize, range: std::ops::Range<usize>) {
        let group = &self.groups[which];
        gpu.queue().write_buffer(
            &group.world_buffer,
            (range.start * std::mem::size_of::<Transform>()) as u64,
            bytemuck::cast_slice(&group.world_transforms[range.clone()]),
        );
        gpu.queue().write_buffer(
            &group.sheet_buffer,
            (range.start * std::mem::size_of::<SheetRegion>()) as u64,
            bytemuck::cast_slice(&group.sheet_regions[range]),
        );
    }
    /// Get a read-only view of a specified sprite group's world
    /// transforms and sheet regions.
    pub fn get_sprites(&self, which: usize) -> (&[Transform], &[SheetRegion]) {
        let group = &self.groups[which];
        (&group.world_transforms, &group.sheet_regions)
    }
    /// Get a mutable view of a specified sprite group's world
    /// transforms and sheet regions.
    pub fn get_sprites_mut(&mut self, which: usize) -> (&mut [Transform], &mut [SheetRegion]) {
        let group = &mut self.groups[which];
        (&mut group.world_transforms, &mut group.sheet_regions)
    }
    /// Render the given range of sprite groups into the given pass.
    pub fn render<'s, 'pass>(
        &'s self,
        rpass: &mut wgpu::RenderPass<'pass>,
        which: impl RangeBounds<usize>,
    ) where
        's: 'pass,
    {
        rpass.set_pipeline(&self.pipeline);
        for group in &self.groups[crate::range(which, self.groups.len())] {
            rpass.set_vertex_buffer(0, group.world_buffer.slice(..));
            rpass.set_vertex_buffer(1, group.sheet_buffer.slice(..));
            rpass.set_bind_group(0, &group.camera_bind_group, &[]);
            rpass.set_bind_group(1, &group.tex_bind_group, &[]);
            // draw two triangles per sprite, and sprites-many sprites.
            rpass.draw(0..6, 0..group.world_transforms.len() as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_data_matches_vertex_layout() {
        // The pipeline's array strides and attribute offsets assume
        // these exact layouts.
        assert_eq!(std::mem::size_of::<Transform>(), 16);
        assert_eq!(std::mem::size_of::<SheetRegion>(), 12);
        assert_eq!(std::mem::size_of::<Camera2D>(), 16);
    }

    #[test]
    fn sheet_region_with_depth_keeps_rect() {
        let r = SheetRegion::new(128, 64, 0, 32, 16).with_depth(700);
        assert_eq!((r.x, r.y, r.w, r.h), (128, 64, 32, 16));
        assert_eq!(r.depth, 700);
    }
}
