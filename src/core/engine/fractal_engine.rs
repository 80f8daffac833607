use crate::core::actions::generate_fractal::generate_fractal_accelerated::generate_fractal_accelerated;
use crate::core::actions::generate_fractal::generate_fractal_parallel_scoped_threads::generate_fractal_parallel_scoped_threads;
use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    generate_pixel_buffer, generate_pixel_buffer_parallel,
};
use crate::core::colour_maps::blue_white_gradient::BlueWhiteGradient;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::devices::device_manager::DeviceManager;
use crate::core::engine::errors::RenderError;
use crate::core::engine::frame_request::FrameRequest;
use crate::core::engine::strategy::Strategy;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
use log::{debug, warn};

/// The strategies that run on the host. Keeps the accelerator out of the
/// CPU dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CpuStrategy {
    Reference,
    Parallel,
}

fn compute_on_cpu<Alg>(algorithm: &Alg, strategy: CpuStrategy) -> Result<Vec<u32>, RenderError>
where
    Alg: FractalAlgorithm<Success = u32, Failure = PixelToComplexCoordsError> + Sync,
{
    match strategy {
        CpuStrategy::Reference => Ok(generate_fractal_serial(algorithm)?),
        CpuStrategy::Parallel => Ok(generate_fractal_parallel_scoped_threads(algorithm)?),
    }
}

fn compute_on_accelerator(
    request: &FrameRequest,
    devices: &mut DeviceManager,
) -> Result<Vec<u32>, RenderError> {
    let accelerator = devices
        .accelerator()
        .ok_or(RenderError::AcceleratorUnavailable)?;

    match generate_fractal_accelerated(accelerator, request) {
        Ok(counts) => Ok(counts),
        Err(err) => {
            warn!("accelerator failed, disabling it for this session: {err}");
            devices.mark_unavailable();
            Err(RenderError::AcceleratorRuntime(err))
        }
    }
}

/// Escape counts for every pixel of `request`, row-major.
///
/// The accelerator path never falls back to the CPU: a missing device is
/// `AcceleratorUnavailable`, and a device failure marks the manager
/// unavailable before returning `AcceleratorRuntime`.
pub fn compute_iterations(
    request: &FrameRequest,
    strategy: Strategy,
    devices: &mut DeviceManager,
) -> Result<Vec<u32>, RenderError> {
    let cpu_strategy = match strategy {
        Strategy::Reference => CpuStrategy::Reference,
        Strategy::Parallel => CpuStrategy::Parallel,
        Strategy::Accelerator => return compute_on_accelerator(request, devices),
    };

    match request.fractal() {
        FractalKind::Mandelbrot => {
            let algorithm = MandelbrotAlgorithm::new(
                request.pixel_rect(),
                request.bounds(),
                request.max_iterations(),
            )?;
            compute_on_cpu(&algorithm, cpu_strategy)
        }
        FractalKind::Julia { constant } => {
            let algorithm = JuliaAlgorithm::new(
                request.pixel_rect(),
                request.bounds(),
                constant,
                request.max_iterations(),
            )?;
            compute_on_cpu(&algorithm, cpu_strategy)
        }
    }
}

/// Colours escape counts with the shared gradient for `max_iterations`.
pub fn colour_iterations(
    counts: Vec<u32>,
    max_iterations: u32,
    pixel_rect: PixelRect,
    strategy: Strategy,
) -> Result<PixelBuffer, RenderError> {
    let mapper = BlueWhiteGradient::new(max_iterations);

    match strategy {
        Strategy::Reference => Ok(generate_pixel_buffer(counts, &mapper, pixel_rect)?),
        Strategy::Parallel | Strategy::Accelerator => {
            Ok(generate_pixel_buffer_parallel(&counts, &mapper, pixel_rect)?)
        }
    }
}

pub fn render_frame(
    request: &FrameRequest,
    strategy: Strategy,
    devices: &mut DeviceManager,
) -> Result<PixelBuffer, RenderError> {
    let counts = compute_iterations(request, strategy, devices)?;
    let buffer = colour_iterations(
        counts,
        request.max_iterations(),
        request.pixel_rect(),
        strategy,
    )?;

    debug!(
        "rendered {} {}x{} over {} with {}",
        request.fractal(),
        request.width(),
        request.height(),
        request.bounds(),
        strategy
    );

    Ok(buffer)
}
