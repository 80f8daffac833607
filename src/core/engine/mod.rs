pub mod errors;
pub mod fractal_engine;
pub mod frame_request;
pub mod strategy;
