//! A wrapper for WGPU state.

use std::sync::Arc;

#[derive(Debug)]
pub enum SpritelyError {
    NoUsableAdapter,
}
impl std::fmt::Display for SpritelyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpritelyError::NoUsableAdapter => {
                f.write_str("No valid adapter found for GPU requirements")
            }
        }
    }
}
impl std::error::Error for SpritelyError {}

/// A wrapper for a WGPU instance, adapter, device, and queue.
#[allow(dead_code)]
pub struct WGPU {
    instance: Arc<wgpu::Instance>,
    adapter: Arc<wgpu::Adapter>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
}

impl WGPU {
    /// Create a WGPU structure with already-created GPU resources.
    pub fn with_resources(
        instance: Arc<wgpu::Instance>,
        adapter: Arc<wgpu::Adapter>,
        device: Arc<wgpu::Device>,
        queue: Arc<wgpu::Queue>,
    ) -> Self {
        Self {
            instance,
            adapter,
            device,
            queue,
        }
    }
    /// Create a WGPU structure by initializing WGPU for display onto the given surface.
    pub async fn new(
        instance: Arc<wgpu::Instance>,
        surface: Option<&wgpu::Surface<'static>>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                // Request an adapter which can render to our surface
                compatible_surface: surface,
            })
            .await
            .ok_or(SpritelyError::NoUsableAdapter)?;

        // Create the logical device and command queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;
        Ok(Self::with_resources(
            instance,
            Arc::new(adapter),
            Arc::new(device),
            Arc::new(queue),
        ))
    }
    /// Returns this GPU wrapper's [`wgpu::Instance`].
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }
    /// Returns this GPU wrapper's [`wgpu::Adapter`].
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }
    /// Returns this GPU wrapper's [`wgpu::Device`].
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
    /// Returns this GPU wrapper's [`wgpu::Queue`].
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
