//! Pause menu layout and hit-testing
//!
//! Shared by the simulation (click handling) and the renderer (drawing), so
//! the buttons are always hit where they are drawn.

use glam::Vec2;

use crate::sim::Rect;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Pause menu buttons, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    Resume,
    MainMenu,
    Quit,
}

impl MenuButton {
    pub const ALL: [MenuButton; 3] = [MenuButton::Resume, MenuButton::MainMenu, MenuButton::Quit];

    /// Vertical offset of the button's top edge from the field centre
    fn top_offset(&self) -> f32 {
        match self {
            MenuButton::Resume => -70.0,
            MenuButton::MainMenu => -10.0,
            MenuButton::Quit => 50.0,
        }
    }

    pub fn rect(&self, field: Vec2) -> Rect {
        Rect::new(
            field.x / 2.0 - BUTTON_WIDTH / 2.0,
            field.y / 2.0 + self.top_offset(),
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        )
    }

    /// Button under `point`, edges inclusive
    pub fn at(field: Vec2, point: Vec2) -> Option<MenuButton> {
        Self::ALL
            .into_iter()
            .find(|button| button.rect(field).contains(point))
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::Resume => "RESUME",
            MenuButton::MainMenu => "MAIN MENU",
            MenuButton::Quit => "QUIT",
        }
    }

    /// Fill colour when the cursor is over the button
    pub fn hover_color(&self) -> [f32; 4] {
        match self {
            MenuButton::Resume => [0.565, 0.933, 0.565, 1.0],   // light green
            MenuButton::MainMenu => [0.678, 0.847, 0.902, 1.0], // light blue
            MenuButton::Quit => [0.980, 0.502, 0.447, 1.0],     // salmon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(1280.0, 800.0);

    #[test]
    fn test_button_layout() {
        let resume = MenuButton::Resume.rect(FIELD);
        assert_eq!(resume.min, Vec2::new(540.0, 330.0));
        assert_eq!(resume.size, Vec2::new(BUTTON_WIDTH, BUTTON_HEIGHT));
        assert_eq!(MenuButton::MainMenu.rect(FIELD).min.y, 390.0);
        assert_eq!(MenuButton::Quit.rect(FIELD).min.y, 450.0);
    }

    #[test]
    fn test_hit_testing() {
        assert_eq!(MenuButton::at(FIELD, Vec2::new(640.0, 350.0)), Some(MenuButton::Resume));
        assert_eq!(MenuButton::at(FIELD, Vec2::new(540.0, 390.0)), Some(MenuButton::MainMenu));
        assert_eq!(MenuButton::at(FIELD, Vec2::new(740.0, 490.0)), Some(MenuButton::Quit));
        // Gap between Resume and Main Menu
        assert_eq!(MenuButton::at(FIELD, Vec2::new(640.0, 380.0)), None);
        assert_eq!(MenuButton::at(FIELD, Vec2::new(100.0, 350.0)), None);
    }

    #[test]
    fn test_labels_unique() {
        let labels: Vec<_> = MenuButton::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels, vec!["RESUME", "MAIN MENU", "QUIT"]);
    }
}
