//! Maps pointer and keyboard input onto a [`RenderSession`] and pushes the
//! resulting frames to a [`FrameSink`].
//!
//! The controller runs on the caller's thread. Events are applied to the
//! session immediately but only mark the view dirty; the presentation loop
//! calls `update` once after draining each batch, so a burst of zooms and
//! pans costs a single recompute at the latest bounds.
//!
//! [`RenderSession`]: crate::controllers::session::render_session::RenderSession

mod controller;
pub mod events;
pub mod ports;

pub use controller::InteractiveController;
pub use events::{InputEvent, KeyCode, PointerButton};
pub use ports::frame_sink::{FrameEvent, FrameSink};
