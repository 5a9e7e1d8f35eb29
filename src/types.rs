/// Integer pixel rectangle in playfield space. `x`/`y` are the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Rectangle of the given size whose centre lands on `(cx, cy)`.
    /// Odd sizes put the extra pixel on the right/bottom, same as the centre getters.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn collides(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Wraps an angle in degrees into `[0, max)`, including negative inputs.
pub fn wrap_angle(value: i32, max: i32) -> i32 {
    value.rem_euclid(max)
}

/// Size of the axis-aligned box around a `w x h` sprite rotated by `angle_deg`,
/// truncated to whole pixels.
pub fn rotated_extent(w: i32, h: i32, angle_deg: i32) -> (i32, i32) {
    let radians = (angle_deg as f64).to_radians();
    let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
    let (w, h) = (w as f64, h as f64);
    // Absorb float noise so right angles don't lose a pixel
    let rotated_w = (w * cos + h * sin + 1e-9).floor() as i32;
    let rotated_h = (w * sin + h * cos + 1e-9).floor() as i32;
    (rotated_w, rotated_h)
}
