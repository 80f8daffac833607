use crate::controllers::file_names::{julia_file_name, view_file_name};
use crate::controllers::interactive::events::{InputEvent, KeyCode, PointerButton};
use crate::controllers::interactive::ports::frame_sink::{FrameEvent, FrameSink};
use crate::controllers::session::errors::SessionError;
use crate::controllers::session::render_session::{RenderSession, SessionState};
use crate::core::config::{KEY_ZOOM_STEP, MIN_SELECTION_PIXELS, MIN_ZOOM, SCROLL_ZOOM_STEP};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::view::view_transform::ViewTransform;
use crate::storage::write_bmp::write_bmp;
use chrono::Local;
use log::{debug, info, warn};
use std::path::PathBuf;

pub struct InteractiveController<S: FrameSink> {
    session: RenderSession,
    sink: S,
    output_dir: PathBuf,
    pointer: Point,
    selection_start: Option<Point>,
    pan_anchor: Option<Point>,
}

impl<S: FrameSink> InteractiveController<S> {
    pub fn new(session: RenderSession, sink: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            session,
            sink,
            output_dir: output_dir.into(),
            pointer: Point::default(),
            selection_start: None,
            pan_anchor: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &RenderSession {
        &self.session
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Starts a session and presents its first frame.
    pub fn start(
        &mut self,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Result<(), SessionError> {
        let report = self.session.start(width, height, max_iterations)?;
        info!("\n{report}");

        self.pointer = Point::default();
        self.selection_start = None;
        self.pan_anchor = None;
        self.present_result();

        Ok(())
    }

    /// Applies one input event to the session. View changes only mark the
    /// frame dirty; call [`update`](Self::update) once per batch of events
    /// to render them.
    ///
    /// Errors are reported to the sink; none of them end the session.
    pub fn handle(&mut self, event: InputEvent) {
        if self.session.state() != SessionState::Interactive {
            debug!("ignoring {event:?} while {}", self.session.state());
            return;
        }

        let outcome = match event {
            InputEvent::PointerPressed { position, button } => {
                self.on_pointer_pressed(position, button);
                Ok(())
            }
            InputEvent::PointerMoved { position } => self.on_pointer_moved(position),
            InputEvent::PointerReleased { position, button } => {
                self.on_pointer_released(position, button)
            }
            InputEvent::Scroll { delta } => self.on_scroll(delta),
            InputEvent::Key(key) => self.on_key(key),
        };

        if let Err(err) = outcome {
            self.report(&err);
        }
    }

    fn on_pointer_pressed(&mut self, position: Point, button: PointerButton) {
        self.pointer = position;

        match button {
            PointerButton::Left => self.selection_start = Some(position),
            PointerButton::Right if self.zoom_factor() > MIN_ZOOM => {
                self.pan_anchor = Some(position);
            }
            _ => {}
        }
    }

    fn on_pointer_moved(&mut self, position: Point) -> Result<(), SessionError> {
        self.pointer = position;

        if let Some(anchor) = self.pan_anchor {
            if self.zoom_factor() > MIN_ZOOM {
                self.session.pan(
                    -f64::from(position.x - anchor.x),
                    -f64::from(position.y - anchor.y),
                )?;
                self.pan_anchor = Some(position);
            }
            return Ok(());
        }

        if self.selection_start.is_some() || !self.pointer_on_image() {
            return Ok(());
        }

        let preview = self.session.julia_preview(position)?;
        self.sink.submit(FrameEvent::JuliaPreview(&preview));

        Ok(())
    }

    fn on_pointer_released(
        &mut self,
        position: Point,
        button: PointerButton,
    ) -> Result<(), SessionError> {
        self.pointer = position;

        match button {
            PointerButton::Left => {
                let Some(start) = self.selection_start.take() else {
                    return Ok(());
                };

                if position.x.abs_diff(start.x) > MIN_SELECTION_PIXELS
                    && position.y.abs_diff(start.y) > MIN_SELECTION_PIXELS
                {
                    self.session
                        .zoom_to_selection(PixelRect::spanning(start, position))?;
                } else {
                    debug!("selection too small, ignored");
                }
            }
            PointerButton::Right => self.pan_anchor = None,
            PointerButton::Other => {}
        }

        Ok(())
    }

    fn on_scroll(&mut self, delta: f64) -> Result<(), SessionError> {
        if delta > 0.0 {
            self.session.zoom(SCROLL_ZOOM_STEP, self.pointer)?;
        } else if delta < 0.0 {
            self.session.zoom(1.0 / SCROLL_ZOOM_STEP, self.pointer)?;
        }

        Ok(())
    }

    fn on_key(&mut self, key: KeyCode) -> Result<(), SessionError> {
        match key {
            KeyCode::Escape => {
                self.session.new_session();
                self.selection_start = None;
                self.pan_anchor = None;
                self.sink.submit(FrameEvent::SessionEnded);
            }
            KeyCode::S => self.save_view()?,
            KeyCode::J => self.generate_julia()?,
            KeyCode::R => {
                self.session.reset()?;
            }
            KeyCode::Equal | KeyCode::Plus => {
                self.session.zoom(KEY_ZOOM_STEP, self.pointer)?;
            }
            KeyCode::Minus => {
                self.session.zoom(1.0 / KEY_ZOOM_STEP, self.pointer)?;
            }
            KeyCode::Other => {}
        }

        Ok(())
    }

    fn save_view(&mut self) -> Result<(), SessionError> {
        let Some(view) = self.session.view() else {
            return Ok(());
        };
        let screen = view.screen();
        let path = self.output_dir.join(view_file_name(
            screen.width(),
            screen.height(),
            view.zoom_factor(),
            Local::now(),
        ));

        self.session.save(&path)?;
        self.sink.submit(FrameEvent::Saved(&path));

        Ok(())
    }

    fn generate_julia(&mut self) -> Result<(), SessionError> {
        let julia = self.session.generate_julia(self.pointer)?;
        self.sink.submit(FrameEvent::Julia(&julia));

        let path = self.output_dir.join(julia_file_name(
            julia.buffer.width(),
            julia.buffer.height(),
            self.session.max_iterations(),
            julia.constant,
            Local::now(),
        ));

        write_bmp(&julia.buffer, &path)?;
        info!("julia set saved to {}", path.display());
        self.sink.submit(FrameEvent::Saved(&path));

        Ok(())
    }

    /// Runs the pending recompute, if any, and presents the new frame.
    /// However many events marked the view dirty, only the latest bounds are
    /// rendered. A failed accelerator is disabled by the session, so one
    /// retry lands on the CPU.
    pub fn update(&mut self) {
        if self.session.state() != SessionState::Interactive {
            return;
        }

        let outcome = match self.session.update() {
            Err(err @ SessionError::AcceleratorRuntime(_)) => {
                self.report(&err);
                self.session.update()
            }
            other => other,
        };

        match outcome {
            Ok(true) => self.present_result(),
            Ok(false) => {}
            Err(err) => self.report(&err),
        }
    }

    fn present_result(&self) {
        if let Some(result) = self.session.result() {
            self.sink.submit(FrameEvent::Frame(result));
        }
    }

    fn report(&self, err: &SessionError) {
        warn!("{err}");
        self.sink.submit(FrameEvent::Error(err));
    }

    fn zoom_factor(&self) -> f64 {
        self.session
            .view()
            .map_or(MIN_ZOOM, ViewTransform::zoom_factor)
    }

    fn pointer_on_image(&self) -> bool {
        self.session
            .view()
            .is_some_and(|view| view.screen().contains_point(self.pointer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExplorerConfig;
    use crate::core::devices::device_manager::DeviceManager;
    use crate::core::devices::test_support::FailingAccelerator;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        events: RefCell<Vec<&'static str>>,
    }

    impl RecordingSink {
        fn take(&self) -> Vec<&'static str> {
            std::mem::take(&mut *self.events.borrow_mut())
        }
    }

    impl FrameSink for RecordingSink {
        fn submit(&self, event: FrameEvent<'_>) {
            let name = match event {
                FrameEvent::Frame(_) => "frame",
                FrameEvent::JuliaPreview(_) => "preview",
                FrameEvent::Julia(_) => "julia",
                FrameEvent::Saved(_) => "saved",
                FrameEvent::Error(_) => "error",
                FrameEvent::SessionEnded => "ended",
            };
            self.events.borrow_mut().push(name);
        }
    }

    fn controller_in(dir: &std::path::Path) -> InteractiveController<RecordingSink> {
        let session = RenderSession::new(ExplorerConfig::default(), DeviceManager::unavailable());
        let mut controller = InteractiveController::new(session, RecordingSink::default(), dir);
        controller.start(100, 80, 40).unwrap();
        controller.sink().take();
        controller
    }

    fn press(x: i32, y: i32, button: PointerButton) -> InputEvent {
        InputEvent::PointerPressed {
            position: Point { x, y },
            button,
        }
    }

    fn release(x: i32, y: i32, button: PointerButton) -> InputEvent {
        InputEvent::PointerReleased {
            position: Point { x, y },
            button,
        }
    }

    fn zoom_of(controller: &InteractiveController<RecordingSink>) -> f64 {
        controller.session().view().unwrap().zoom_factor()
    }

    #[test]
    fn test_start_presents_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        let session = RenderSession::new(ExplorerConfig::default(), DeviceManager::unavailable());
        let mut controller = InteractiveController::new(session, RecordingSink::default(), dir.path());

        controller.start(40, 30, 20).unwrap();

        assert_eq!(controller.sink().take(), vec!["frame"]);
    }

    #[test]
    fn test_left_drag_zooms_to_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(press(25, 20, PointerButton::Left));
        controller.handle(release(75, 60, PointerButton::Left));
        controller.update();

        assert!((zoom_of(&controller) - 1.0 / 0.525).abs() < 1e-12);
        assert_eq!(controller.sink().take(), vec!["frame"]);
    }

    #[test]
    fn test_small_selection_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(press(10, 10, PointerButton::Left));
        controller.handle(release(30, 60, PointerButton::Left));
        controller.update();

        assert_eq!(zoom_of(&controller), 1.0);
        assert!(controller.sink().take().is_empty());
    }

    #[test]
    fn test_right_drag_pans_only_when_zoomed() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(press(20, 20, PointerButton::Right));
        controller.handle(InputEvent::PointerMoved {
            position: Point { x: 25, y: 20 },
        });
        controller.handle(release(25, 20, PointerButton::Right));
        assert_eq!(controller.session().view().unwrap().view_center(), (50.0, 40.0));

        controller.handle(press(25, 20, PointerButton::Left));
        controller.handle(release(75, 60, PointerButton::Left));
        controller.update();
        controller.sink().take();

        controller.handle(press(20, 20, PointerButton::Right));
        controller.handle(InputEvent::PointerMoved {
            position: Point { x: 25, y: 20 },
        });
        controller.handle(release(25, 20, PointerButton::Right));
        controller.update();

        let (center_x, center_y) = controller.session().view().unwrap().view_center();
        assert_eq!(center_x, 45.0);
        assert_eq!(center_y, 40.0);
        assert_eq!(controller.sink().take(), vec!["frame"]);
    }

    #[test]
    fn test_scroll_and_keys_zoom() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(InputEvent::Scroll { delta: -1.0 });
        controller.update();
        assert_eq!(zoom_of(&controller), 1.0);
        assert!(controller.sink().take().is_empty());

        controller.handle(InputEvent::Scroll { delta: 1.0 });
        controller.update();
        assert!((zoom_of(&controller) - SCROLL_ZOOM_STEP).abs() < 1e-12);

        for key in [KeyCode::Plus, KeyCode::Minus, KeyCode::Equal] {
            controller.handle(InputEvent::Key(key));
            controller.update();
        }
        assert!((zoom_of(&controller) - SCROLL_ZOOM_STEP * KEY_ZOOM_STEP).abs() < 1e-9);

        controller.handle(InputEvent::Key(KeyCode::R));
        controller.update();
        assert_eq!(zoom_of(&controller), 1.0);
        assert_eq!(controller.sink().take(), vec!["frame"; 5]);
    }

    #[test]
    fn test_event_batch_renders_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        for _ in 0..3 {
            controller.handle(InputEvent::Scroll { delta: 1.0 });
        }
        assert!(controller.session().is_dirty());
        assert!(controller.sink().take().is_empty());

        controller.update();
        controller.update();

        assert!(!controller.session().is_dirty());
        assert_eq!(controller.sink().take(), vec!["frame"]);
        assert!((zoom_of(&controller) - SCROLL_ZOOM_STEP.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_move_sends_julia_preview() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(InputEvent::PointerMoved {
            position: Point { x: 30, y: 30 },
        });
        controller.handle(InputEvent::PointerMoved {
            position: Point { x: 300, y: 30 },
        });

        assert_eq!(controller.sink().take(), vec!["preview"]);
    }

    #[test]
    fn test_save_key_writes_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(InputEvent::Key(KeyCode::S));

        assert_eq!(controller.sink().take(), vec!["saved"]);
        let saved: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(saved.len(), 1);
        let name = saved[0].as_ref().unwrap().file_name();
        assert!(name.to_string_lossy().starts_with("mandelbrot_100x80_zoom1x_"));
    }

    #[test]
    fn test_save_into_missing_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(&dir.path().join("missing"));

        controller.handle(InputEvent::Key(KeyCode::S));

        assert_eq!(controller.sink().take(), vec!["error"]);
        assert_eq!(controller.session().state(), SessionState::Interactive);
    }

    #[test]
    fn test_julia_key_renders_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(InputEvent::PointerMoved {
            position: Point { x: 40, y: 40 },
        });
        controller.sink().take();
        controller.handle(InputEvent::Key(KeyCode::J));

        assert_eq!(controller.sink().take(), vec!["julia", "saved"]);
        let name = std::fs::read_dir(dir.path())
            .unwrap()
            .next()
            .unwrap()
            .unwrap()
            .file_name();
        assert!(name.to_string_lossy().starts_with("julia_100x80_iter40_c"));
    }

    #[test]
    fn test_escape_ends_session_and_ignores_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = controller_in(dir.path());

        controller.handle(InputEvent::Key(KeyCode::Escape));
        controller.handle(InputEvent::Scroll { delta: 1.0 });
        controller.update();

        assert_eq!(controller.session().state(), SessionState::Idle);
        assert_eq!(controller.sink().take(), vec!["ended"]);
        assert!(controller.session().result().is_some());
    }

    #[test]
    fn test_failed_accelerator_leaves_cpu_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let session = RenderSession::new(
            ExplorerConfig::default(),
            DeviceManager::with_accelerator(Box::new(FailingAccelerator)),
        );
        let mut controller = InteractiveController::new(session, RecordingSink::default(), dir.path());
        controller.start(60, 40, 30).unwrap();

        controller.handle(InputEvent::Scroll { delta: 1.0 });
        controller.update();

        assert!(!controller.session().devices().available());
        assert_eq!(controller.sink().take(), vec!["frame", "frame"]);
    }
}
