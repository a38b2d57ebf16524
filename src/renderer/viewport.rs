//! Letterboxed mapping between the logical field and the window

use glam::Vec2;

/// Fits the field into the surface, preserving aspect ratio, centred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in pixels
    pub screen: Vec2,
    /// Logical field size
    pub field: Vec2,
    /// Pixels per field unit
    pub scale: f32,
    /// Top-left of the field on screen, in pixels
    pub offset: Vec2,
}

impl Viewport {
    pub fn new(width: u32, height: u32, field: Vec2) -> Self {
        let screen = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let scale = (screen.x / field.x).min(screen.y / field.y);
        let offset = (screen - field * scale) / 2.0;
        Self {
            screen,
            field,
            scale,
            offset,
        }
    }

    pub fn field_to_screen(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }

    /// Cursor position in pixels to field coordinates
    pub fn screen_to_field(&self, p: Vec2) -> Vec2 {
        (p - self.offset) / self.scale
    }

    /// Field coordinates to normalized device coordinates (y up)
    pub fn field_to_ndc(&self, p: Vec2) -> Vec2 {
        let s = self.field_to_screen(p);
        Vec2::new(s.x / self.screen.x * 2.0 - 1.0, 1.0 - s.y / self.screen.y * 2.0)
    }
}
