pub mod capability;
pub mod device_manager;
#[cfg(test)]
pub(crate) mod test_support;
#[cfg(feature = "gpu")]
pub mod wgpu_accelerator;
