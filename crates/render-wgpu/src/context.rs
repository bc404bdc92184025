use crate::gpu::DEPTH_FORMAT;

/// Errors from setting up the GPU surface and device.
#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Surface, device and queue for one window.
pub struct GpuContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    /// Whether `PolygonMode::Line` pipelines can be built.
    pub wireframe_supported: bool,
    /// Multisample count usable with the surface and depth formats.
    pub sample_count: u32,
}

impl GpuContext {
    /// Create a surface for `target` and configure it at `width` x `height`.
    ///
    /// Blocks on adapter and device requests. `msaa_samples` is lowered to the
    /// largest count the adapter supports.
    pub fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
        msaa_samples: u32,
    ) -> Result<Self, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(target)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderInitError::NoAdapter)?;

        let adapter_features = adapter.features();
        let wireframe_supported = adapter_features.contains(wgpu::Features::POLYGON_MODE_LINE);
        let mut required_features = wgpu::Features::empty();
        if wireframe_supported {
            required_features |= wgpu::Features::POLYGON_MODE_LINE;
        } else {
            tracing::warn!("adapter lacks POLYGON_MODE_LINE, wireframe disabled");
        }
        // counts other than 1 and 4 need adapter-specific format features
        let format_specific =
            adapter_features.contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES);
        if format_specific {
            required_features |= wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
        }

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("litcube_device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderInitError::NoSurfaceFormat)?;

        let color_flags = adapter.get_texture_format_features(surface_format).flags;
        let depth_flags = adapter.get_texture_format_features(DEPTH_FORMAT).flags;
        let sample_count = pick_sample_count(msaa_samples, |count| {
            let by_format = color_flags.sample_count_supported(count)
                && depth_flags.sample_count_supported(count);
            by_format && (format_specific || count == 4)
        });
        if sample_count != msaa_samples {
            tracing::warn!(
                requested = msaa_samples,
                sample_count,
                "multisample count lowered for this adapter"
            );
        }

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let backend = adapter.get_info().backend;
        tracing::info!(
            format = ?surface_format,
            wireframe_supported,
            sample_count,
            "GPU initialized with {} backend",
            backend.to_str()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            wireframe_supported,
            sample_count,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Width over height of the configured surface.
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Reconfigure the surface after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure at the current size, e.g. after a lost or outdated surface.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Largest power of two not above `requested` that `supported` accepts.
/// A count of 1 is always accepted.
fn pick_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    let mut count = requested.max(1).next_power_of_two();
    if count > requested.max(1) {
        count /= 2;
    }
    while count > 1 && !supported(count) {
        count /= 2;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_request_is_kept() {
        assert_eq!(pick_sample_count(4, |c| c == 4), 4);
        assert_eq!(pick_sample_count(1, |_| false), 1);
    }

    #[test]
    fn unsupported_request_falls_back() {
        assert_eq!(pick_sample_count(8, |c| c == 4), 4);
        assert_eq!(pick_sample_count(16, |c| c <= 2), 2);
        assert_eq!(pick_sample_count(4, |_| false), 1);
    }

    #[test]
    fn odd_requests_round_down() {
        assert_eq!(pick_sample_count(0, |_| true), 1);
        assert_eq!(pick_sample_count(6, |_| true), 4);
    }
}
