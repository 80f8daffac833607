use crate::core::actions::generate_fractal::ports::accelerator::{Accelerator, AcceleratorError};
use crate::core::engine::fractal_engine::compute_iterations;
use crate::core::engine::frame_request::FrameRequest;
use crate::core::engine::strategy::Strategy;
use crate::core::devices::device_manager::DeviceManager;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Stands in for a GPU by running the reference scan.
#[derive(Debug, Default)]
pub struct CpuBackedAccelerator {
    releases: Arc<AtomicUsize>,
}

impl CpuBackedAccelerator {
    pub fn release_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.releases)
    }
}

impl Accelerator for CpuBackedAccelerator {
    fn name(&self) -> &str {
        "cpu-backed"
    }

    fn compute_iterations(&mut self, request: &FrameRequest) -> Result<Vec<u32>, AcceleratorError> {
        compute_iterations(request, Strategy::Reference, &mut DeviceManager::unavailable())
            .map_err(|err| AcceleratorError::Launch(err.to_string()))
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fails every launch.
#[derive(Debug)]
pub struct FailingAccelerator;

impl Accelerator for FailingAccelerator {
    fn name(&self) -> &str {
        "failing"
    }

    fn compute_iterations(&mut self, _: &FrameRequest) -> Result<Vec<u32>, AcceleratorError> {
        Err(AcceleratorError::Launch("device lost".to_string()))
    }
}
