use crate::core::actions::generate_fractal::ports::accelerator::Accelerator;
use log::info;

/// Owns the optional accelerator for a session.
///
/// Once an accelerator has failed, or been released, the manager reports
/// unavailable for the rest of its life.
pub struct DeviceManager {
    accelerator: Option<Box<dyn Accelerator>>,
}

impl DeviceManager {
    /// Looks for a usable GPU. Without the `gpu` feature this always yields
    /// an unavailable manager.
    #[must_use]
    pub fn probe() -> Self {
        #[cfg(feature = "gpu")]
        {
            match crate::core::devices::wgpu_accelerator::WgpuAccelerator::probe() {
                Ok(accelerator) => {
                    info!("accelerator selected: {}", accelerator.name());
                    return Self::with_accelerator(Box::new(accelerator));
                }
                Err(err) => info!("no accelerator available: {err}"),
            }
        }

        #[cfg(not(feature = "gpu"))]
        info!("built without the gpu feature, accelerator disabled");

        Self::unavailable()
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self { accelerator: None }
    }

    #[must_use]
    pub fn with_accelerator(accelerator: Box<dyn Accelerator>) -> Self {
        Self {
            accelerator: Some(accelerator),
        }
    }

    #[must_use]
    pub fn available(&self) -> bool {
        self.accelerator.is_some()
    }

    #[must_use]
    pub fn device_name(&self) -> Option<&str> {
        self.accelerator.as_deref().map(|accelerator| accelerator.name())
    }

    pub fn accelerator(&mut self) -> Option<&mut (dyn Accelerator + 'static)> {
        self.accelerator.as_deref_mut()
    }

    pub fn mark_unavailable(&mut self) {
        self.release();
    }

    /// Frees the device. Calling it again does nothing.
    pub fn release(&mut self) {
        if let Some(mut accelerator) = self.accelerator.take() {
            accelerator.release();
            info!("accelerator released: {}", accelerator.name());
        }
    }
}

impl Drop for DeviceManager {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for DeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceManager")
            .field("accelerator", &self.device_name())
            .finish()
    }
}
