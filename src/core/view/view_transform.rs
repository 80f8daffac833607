use crate::core::config::{MAX_ZOOM, MIN_ZOOM, SELECTION_MARGIN, ZOOM_SNAP_EPSILON};
use crate::core::data::bounds::Bounds;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use crate::core::util::pixel_to_complex_coords::{axis_to_complex, complex_to_axis};
use log::debug;

/// Maps between screen pixels and the complex plane while the user zooms
/// and pans.
///
/// The visible region is a rectangle in screen-pixel space, `W/zoom` by
/// `H/zoom` around `center`. Live bounds are always derived afresh from the
/// original bounds and that rectangle, so repeated operations never
/// accumulate drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    screen: PixelRect,
    original: Bounds,
    center_x: f64,
    center_y: f64,
    zoom: f64,
    bounds: Bounds,
}

impl ViewTransform {
    /// `original` is sanitized once here and is the anchor for every later
    /// zoom, pan and reset.
    pub fn new(width: u32, height: u32, original: Bounds) -> Result<Self, PixelRectError> {
        let screen = PixelRect::from_size(width, height)?;
        let original = original.sanitized();

        Ok(Self {
            screen,
            original,
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            zoom: MIN_ZOOM,
            bounds: original,
        })
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn original_bounds(&self) -> Bounds {
        self.original
    }

    #[must_use]
    pub fn screen(&self) -> PixelRect {
        self.screen
    }

    /// Center of the visible rectangle in screen-pixel space.
    #[must_use]
    pub fn view_center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    /// Size of the visible rectangle in screen-pixel space.
    #[must_use]
    pub fn view_size(&self) -> (f64, f64) {
        (self.screen_width() / self.zoom, self.screen_height() / self.zoom)
    }

    fn screen_width(&self) -> f64 {
        self.screen.width() as f64
    }

    fn screen_height(&self) -> f64 {
        self.screen.height() as f64
    }

    /// The complex point shown at `pixel`, or the origin when `pixel` is off
    /// the image.
    #[must_use]
    pub fn screen_to_complex(&self, pixel: Point) -> Complex {
        if !self.screen.contains_point(pixel) {
            return Complex::ORIGIN;
        }

        Complex::new(
            axis_to_complex(
                pixel.x as u32,
                self.screen.width(),
                self.bounds.x_min(),
                self.bounds.x_max(),
            ),
            axis_to_complex(
                pixel.y as u32,
                self.screen.height(),
                self.bounds.y_min(),
                self.bounds.y_max(),
            ),
        )
    }

    /// Fractional pixel position of `point` against the live bounds.
    #[must_use]
    pub fn complex_to_screen(&self, point: Complex) -> (f64, f64) {
        (
            complex_to_axis(
                point.real,
                self.screen.width(),
                self.bounds.x_min(),
                self.bounds.x_max(),
            ),
            complex_to_axis(
                point.imag,
                self.screen.height(),
                self.bounds.y_min(),
                self.bounds.y_max(),
            ),
        )
    }

    fn screen_to_view(&self, pixel: Point) -> (f64, f64) {
        let (view_width, view_height) = self.view_size();

        (
            self.center_x - view_width / 2.0 + pixel.x as f64 / self.zoom,
            self.center_y - view_height / 2.0 + pixel.y as f64 / self.zoom,
        )
    }

    /// Zooms by `factor` about the point under `pivot`, which becomes the new
    /// view center. Returns false, changing nothing, when the resulting zoom
    /// would leave `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> bool {
        let mut new_zoom = self.zoom * factor;

        if (new_zoom - MIN_ZOOM).abs() <= ZOOM_SNAP_EPSILON {
            new_zoom = MIN_ZOOM;
        }

        if !factor.is_finite() || !(MIN_ZOOM..=MAX_ZOOM).contains(&new_zoom) {
            debug!("zoom {new_zoom} out of range, ignored");
            return false;
        }

        let pivot = if self.screen.contains_point(pivot) {
            pivot
        } else {
            Point {
                x: (self.screen.width() / 2) as i32,
                y: (self.screen.height() / 2) as i32,
            }
        };

        let (world_x, world_y) = self.screen_to_view(pivot);
        self.center_x = world_x;
        self.center_y = world_y;
        self.zoom = new_zoom;
        self.constrain_view();
        self.update_bounds();

        debug!("zoomed to {:.4}x, bounds {}", self.zoom, self.bounds);
        true
    }

    /// Zooms so the dragged `selection` fills the image with a small margin.
    /// The resulting zoom is clamped into `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_to_selection(&mut self, selection: PixelRect) -> bool {
        let start = self.screen_to_view(selection.top_left());
        let end = self.screen_to_view(selection.bottom_right());

        let selection_width = (end.0 - start.0).abs();
        let selection_height = (end.1 - start.1).abs();

        let scale = (selection_width / self.screen_width())
            .max(selection_height / self.screen_height())
            * SELECTION_MARGIN;

        if !(scale.is_finite() && scale > 0.0) {
            return false;
        }

        self.center_x = (start.0 + end.0) / 2.0;
        self.center_y = (start.1 + end.1) / 2.0;
        self.zoom = (1.0 / scale).clamp(MIN_ZOOM, MAX_ZOOM);
        self.constrain_view();
        self.update_bounds();

        debug!(
            "zoomed to selection {}x{} at {:.4}x, bounds {}",
            selection.width(),
            selection.height(),
            self.zoom,
            self.bounds
        );
        true
    }

    /// Moves the view center by `(dx, dy)` screen pixels. Only possible while
    /// zoomed in.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if self.zoom <= MIN_ZOOM || !dx.is_finite() || !dy.is_finite() {
            return false;
        }

        self.center_x += dx;
        self.center_y += dy;
        self.constrain_view();
        self.update_bounds();

        true
    }

    /// Returns to the full image at zoom 1 with the original bounds.
    pub fn reset(&mut self) -> bool {
        if self.zoom <= MIN_ZOOM {
            return false;
        }

        self.center_x = self.screen_width() / 2.0;
        self.center_y = self.screen_height() / 2.0;
        self.zoom = MIN_ZOOM;
        self.bounds = self.original;

        debug!("view reset to {}", self.bounds);
        true
    }

    fn constrain_view(&mut self) {
        let (view_width, view_height) = self.view_size();

        self.center_x = constrain_axis(self.center_x, view_width, self.screen_width());
        self.center_y = constrain_axis(self.center_y, view_height, self.screen_height());
    }

    fn update_bounds(&mut self) {
        let (view_width, view_height) = self.view_size();
        let screen_width = self.screen_width();
        let screen_height = self.screen_height();

        let left = self.center_x - view_width / 2.0;
        let right = self.center_x + view_width / 2.0;
        let top = self.center_y - view_height / 2.0;
        let bottom = self.center_y + view_height / 2.0;

        let scale_x = self.original.width() / screen_width;
        let scale_y = self.original.height() / screen_height;

        // Measured from the nearer original edge so a full-image view
        // reproduces the original bounds exactly.
        self.bounds = Bounds::from_raw(
            self.original.x_min() + left * scale_x,
            self.original.x_max() - (screen_width - right) * scale_x,
            self.original.y_min() + top * scale_y,
            self.original.y_max() - (screen_height - bottom) * scale_y,
        )
        .sanitized();
    }
}

fn constrain_axis(center: f64, view_extent: f64, screen_extent: f64) -> f64 {
    if view_extent >= screen_extent {
        return screen_extent / 2.0;
    }

    let half = view_extent / 2.0;

    if center - half < 0.0 {
        half
    } else if center + half > screen_extent {
        screen_extent - half
    } else {
        center
    }
}
