pub mod controllers;
pub mod core;
pub mod presenters;
pub mod storage;

pub use crate::controllers::cli::benchmark::CliBenchmarkController;
pub use crate::controllers::interactive::{
    FrameEvent, FrameSink, InputEvent, InteractiveController, KeyCode, PointerButton,
};
pub use crate::controllers::session::render_session::{RenderSession, SessionState};
pub use crate::core::config::ExplorerConfig;
pub use crate::core::devices::device_manager::DeviceManager;
pub use crate::core::engine::strategy::Strategy;
pub use crate::presenters::file::bmp::BmpFilePresenter;
