//! Integer pixel boxes handed to the renderer and used for hit testing.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned box in whole pixels.
///
/// Produced by the transforms in [`crate::transform`]; the renderer draws
/// exactly this box, and hit testing tests against exactly this box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Frame {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        f64::from(self.left) <= p.x
            && p.x <= f64::from(self.right())
            && f64::from(self.top) <= p.y
            && p.y <= f64::from(self.bottom())
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let f = Frame::new(10, 10, 20, 20);
        assert!(f.contains(Point::new(10.0, 10.0)));
        assert!(f.contains(Point::new(30.0, 30.0)));
        assert!(!f.contains(Point::new(30.5, 30.0)));
        assert!(!f.contains(Point::new(9.9, 15.0)));
    }

    #[test]
    fn serializes_as_plain_fields() {
        let json = serde_json::to_string(&Frame::new(0, 0, 200, 200)).unwrap();
        assert_eq!(json, r#"{"left":0,"top":0,"width":200,"height":200}"#);
    }
}
