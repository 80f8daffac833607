use crate::controllers::session::errors::SessionError;
use crate::controllers::session::render_result::RenderResult;
use crate::controllers::session::render_session::{JuliaPreview, JuliaRender};
use std::path::Path;

/// Everything the controller reports back to the presentation layer.
/// Payloads are borrowed from the session for the duration of the call.
#[derive(Debug)]
pub enum FrameEvent<'a> {
    Frame(&'a RenderResult),
    JuliaPreview(&'a JuliaPreview),
    Julia(&'a JuliaRender),
    Saved(&'a Path),
    Error(&'a SessionError),
    SessionEnded,
}

pub trait FrameSink {
    fn submit(&self, event: FrameEvent<'_>);
}
