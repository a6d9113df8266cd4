//! Pointer and touch input, and the mapping from viewport coordinates to
//! buffer coordinates.
use crate::gfx::prelude::*;

/// An input event delivered by the host UI. Positions are in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// Touch events carry every active touch point. Only the first is used.
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
}

impl InputEvent {
    /// Viewport position of the event, if it has one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown(p) | Self::PointerMove(p) => Some(*p),
            Self::TouchStart(touches) | Self::TouchMove(touches) => touches.first().copied(),
            Self::PointerUp | Self::TouchEnd => None,
        }
    }

    /// Whether this event starts a press.
    pub fn is_press(&self) -> bool {
        matches!(self, Self::PointerDown(_) | Self::TouchStart(_))
    }

    /// Whether this event moves an ongoing press.
    pub fn is_move(&self) -> bool {
        matches!(self, Self::PointerMove(_) | Self::TouchMove(_))
    }

    /// Whether this event ends a press.
    pub fn is_release(&self) -> bool {
        matches!(self, Self::PointerUp | Self::TouchEnd)
    }
}

/// Where a surface sits on screen, and the size of the buffer behind it.
///
/// Surfaces normally keep their backing size equal to their displayed size, in which
/// case the mapping is 1:1. On high-density displays the two can differ, and the
/// ratio between them is applied when mapping into the buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    /// On-screen rectangle, in viewport units.
    pub rect: Rect<f32>,
    /// Backing buffer size, in pixels.
    pub backing: Size<u32>,
}

impl Bounds {
    pub fn new(rect: Rect<f32>, backing: impl Into<Size<u32>>) -> Self {
        Self {
            rect,
            backing: backing.into(),
        }
    }

    /// Bounds whose backing size matches the displayed size.
    pub fn unscaled(rect: Rect<f32>) -> Self {
        let backing = rect.size.map(|n| n.max(0.).round() as u32);

        Self { rect, backing }
    }

    /// Ratio of backing pixels to displayed units, per axis.
    pub fn scale(&self) -> Vector2D<f32> {
        if self.rect.width() <= 0. || self.rect.height() <= 0. {
            return Vector2D::new(1., 1.);
        }
        Size::<f32>::from(self.backing) / self.rect.size
    }

    /// Position relative to the surface's top-left corner, in displayed units.
    pub fn relative(&self, client: Point) -> Point {
        (client - self.rect.origin).into()
    }

    /// Position in backing buffer pixels.
    pub fn to_backing(&self, client: Point) -> Point {
        let relative: Vector2D<f32> = self.relative(client).into();

        (relative * self.scale()).into()
    }
}

/// Map an input event to buffer coordinates. Returns `None` for events without a
/// position, such as a release, or a touch event with no touch points.
pub fn to_buffer_coords(bounds: &Bounds, event: &InputEvent) -> Option<Point> {
    event.position().map(|p| bounds.to_backing(p))
}
