/// Pixel size of a render container.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Size::new(self.width * factor, self.height * factor)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle in container pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Chart margins, CSS order.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Margin {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Plot area left inside `size` once the margins are removed.
    pub fn inner(&self, size: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            (size.width - self.left - self.right).max(0.0),
            (size.height - self.top - self.bottom).max(0.0),
        )
    }
}
