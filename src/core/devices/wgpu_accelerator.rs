use crate::core::actions::generate_fractal::ports::accelerator::{Accelerator, AcceleratorError};
use crate::core::devices::capability::{
    DeviceCandidate, DeviceCapability, DeviceTier, select_best,
};
use crate::core::engine::frame_request::FrameRequest;
use crate::core::fractals::fractal_kinds::FractalKind;
use log::{debug, info};
use std::sync::mpsc;
use wgpu::util::DeviceExt;

const WORKGROUP_SIZE: u32 = 16;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParams {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    c_re: f64,
    c_im: f64,
    width: u32,
    height: u32,
    max_iterations: u32,
    is_julia: u32,
}

impl GpuParams {
    fn from_request(request: &FrameRequest) -> Self {
        let bounds = request.bounds();
        let (c_re, c_im, is_julia) = match request.fractal() {
            FractalKind::Mandelbrot => (0.0, 0.0, 0),
            FractalKind::Julia { constant } => (constant.real, constant.imag, 1),
        };

        Self {
            x_min: bounds.x_min(),
            x_max: bounds.x_max(),
            y_min: bounds.y_min(),
            y_max: bounds.y_max(),
            c_re,
            c_im,
            width: request.width(),
            height: request.height(),
            max_iterations: request.max_iterations(),
            is_julia,
        }
    }
}

fn tier_of(device_type: wgpu::DeviceType) -> DeviceTier {
    match device_type {
        wgpu::DeviceType::DiscreteGpu => DeviceTier::Discrete,
        wgpu::DeviceType::IntegratedGpu => DeviceTier::Integrated,
        wgpu::DeviceType::VirtualGpu => DeviceTier::Virtual,
        wgpu::DeviceType::Cpu => DeviceTier::Software,
        wgpu::DeviceType::Other => DeviceTier::Other,
    }
}

struct GpuState {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

pub struct WgpuAccelerator {
    name: String,
    state: Option<GpuState>,
}

impl WgpuAccelerator {
    /// Enumerates adapters, keeps those with `SHADER_F64`, and opens the most
    /// capable one.
    pub fn probe() -> Result<Self, AcceleratorError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let candidates = instance
            .enumerate_adapters(wgpu::Backends::all())
            .into_iter()
            .map(|adapter| {
                let info = adapter.get_info();
                debug!("found adapter {} ({:?})", info.name, info.backend);

                DeviceCandidate {
                    name: info.name,
                    capability: DeviceCapability {
                        tier: tier_of(info.device_type),
                        max_invocations: adapter.limits().max_compute_invocations_per_workgroup,
                    },
                    supports_f64: adapter.features().contains(wgpu::Features::SHADER_F64),
                    handle: adapter,
                }
            });

        let best = select_best(candidates).ok_or_else(|| {
            AcceleratorError::Device("no adapter supports 64-bit float shaders".to_string())
        })?;

        info!(
            "selected adapter {} ({:?}, {} invocations per workgroup)",
            best.name, best.capability.tier, best.capability.max_invocations
        );

        let adapter = best.handle;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("escape-time-device"),
                required_features: wgpu::Features::SHADER_F64,
                required_limits: adapter.limits(),
            },
            None,
        ))
        .map_err(|err| AcceleratorError::Device(err.to_string()))?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("escape-time-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("escape-time-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape-time-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("escape_time.wgsl").into()),
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("escape-time-pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: "main",
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(AcceleratorError::Device(err.to_string()));
        }

        Ok(Self {
            name: best.name,
            state: Some(GpuState {
                device,
                queue,
                pipeline,
                bind_group_layout,
            }),
        })
    }
}

impl Accelerator for WgpuAccelerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute_iterations(&mut self, request: &FrameRequest) -> Result<Vec<u32>, AcceleratorError> {
        let state = self.state.as_ref().ok_or(AcceleratorError::Unavailable)?;
        let device = &state.device;
        let output_size = (request.pixel_count() * std::mem::size_of::<u32>()) as u64;

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("escape-time-params"),
            contents: bytemuck::bytes_of(&GpuParams::from_request(request)),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape-time-output"),
            size: output_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let readback_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape-time-readback"),
            size: output_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("escape-time-bind-group"),
            layout: &state.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("escape-time-encoder"),
        });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("escape-time-pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&state.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(
                request.width().div_ceil(WORKGROUP_SIZE),
                request.height().div_ceil(WORKGROUP_SIZE),
                1,
            );
        }

        encoder.copy_buffer_to_buffer(&output_buffer, 0, &readback_buffer, 0, output_size);
        state.queue.submit(Some(encoder.finish()));

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(AcceleratorError::Launch(err.to_string()));
        }

        let buffer_slice = readback_buffer.slice(..);
        let (sender, receiver) = mpsc::sync_channel(1);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|err| AcceleratorError::Readback(err.to_string()))?
            .map_err(|err| AcceleratorError::Readback(err.to_string()))?;

        let data = buffer_slice.get_mapped_range();
        let counts = bytemuck::cast_slice::<u8, u32>(&data).to_vec();
        drop(data);
        readback_buffer.unmap();

        Ok(counts)
    }

    fn release(&mut self) {
        if let Some(state) = self.state.take() {
            state.device.destroy();
        }
    }
}
