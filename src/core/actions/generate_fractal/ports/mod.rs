pub mod accelerator;
pub mod fractal_algorithm;
