use crate::geometry::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Landmark {
    Crown,
    Chin,
}

impl Landmark {
    pub const ALL: [Landmark; 2] = [Landmark::Crown, Landmark::Chin];

    pub fn label(self) -> &'static str {
        match self {
            Landmark::Crown => "Crown",
            Landmark::Chin => "Chin",
        }
    }
}

/// A draggable glyph. `pos` is the glyph's top-left corner in container
/// coordinates, the stored position that drags accumulate into.
#[derive(Clone, Debug)]
pub struct Marker {
    pub landmark: Landmark,
    pub pos: Point,
    pub size: Size,
    pub dragging: bool,
}

impl Marker {
    pub fn new(landmark: Landmark, size: Size) -> Self {
        Self {
            landmark,
            pos: Point::ZERO,
            size,
            dragging: false,
        }
    }

    pub fn translate_to(&mut self, pos: Point) {
        self.pos = pos;
    }

    pub fn drag_by(&mut self, delta: egui::Vec2) {
        self.dragging = true;
        self.pos = self.pos + delta;
    }

    /// Ends the drag, pulling the glyph back inside `parent` if it left it.
    pub fn end_drag(&mut self, parent: Size) {
        self.dragging = false;
        self.pos = restrict_to_parent(self.pos, self.size, parent);
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.pos.x + self.size.width / 2.0,
            self.pos.y + self.size.height / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.pos.x
            && p.y >= self.pos.y
            && p.x <= self.pos.x + self.size.width
            && p.y <= self.pos.y + self.size.height
    }
}

fn restrict_to_parent(pos: Point, size: Size, parent: Size) -> Point {
    let max_x = (parent.width - size.width).max(0.0);
    let max_y = (parent.height - size.height).max(0.0);
    Point::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}
