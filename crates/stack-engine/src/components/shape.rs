use glam::Vec2;

/// RGB fill or outline color, channels in 0–255 like the host page's canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const RED: Color = Color::rgb(255.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 255.0, 0.0);
    pub const YELLOW: Color = Color::rgb(255.0, 255.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 255.0, 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Axis-aligned rectangle extent in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub width: f32,
    pub height: f32,
}

impl RectShape {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Stroke drawn around a rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub width: f32,
    pub color: Color,
}

impl Outline {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Which point of the shape `Entity::pos` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    /// Bottom centre.
    Bot,
}

impl Anchor {
    /// Vector from the anchor point to the centre of a shape of `size` (Y-down).
    pub fn center_offset(self, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        match self {
            Anchor::TopLeft => half,
            Anchor::Bot => Vec2::new(0.0, -half.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_anchor_centre_is_above() {
        let off = Anchor::Bot.center_offset(Vec2::new(150.0, 40.0));
        assert_eq!(off, Vec2::new(0.0, -20.0));
    }

    #[test]
    fn top_left_anchor_centre_is_down_right() {
        let off = Anchor::TopLeft.center_offset(Vec2::new(800.0, 100.0));
        assert_eq!(off, Vec2::new(400.0, 50.0));
    }
}
