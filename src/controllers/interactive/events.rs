use crate::core::data::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Escape,
    S,
    J,
    R,
    Equal,
    Plus,
    Minus,
    Other,
}

/// Input from the presentation layer, in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { position: Point, button: PointerButton },
    PointerMoved { position: Point },
    PointerReleased { position: Point, button: PointerButton },
    /// Positive deltas zoom in.
    Scroll { delta: f64 },
    Key(KeyCode),
}
