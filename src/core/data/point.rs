/// A pixel position. Signed so pointer positions outside the image can be
/// represented and rejected rather than wrapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
