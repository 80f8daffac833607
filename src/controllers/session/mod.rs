pub mod benchmark;
pub mod errors;
pub mod render_result;
pub mod render_session;
