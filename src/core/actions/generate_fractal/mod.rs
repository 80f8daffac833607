pub mod generate_fractal_accelerated;
pub mod generate_fractal_parallel_scoped_threads;
pub mod generate_fractal_serial;
pub mod ports;
