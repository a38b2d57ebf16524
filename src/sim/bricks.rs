//! Brick layouts and the active brick grid
//!
//! Each level is a fixed picture drawn in bricks. Patterns are written as
//! text, `#` for a brick and `.` for a hole.

use glam::Vec2;

use super::collision::{Rect, circle_box_overlap};
use crate::consts::*;

const BIRD: &[&str] = &[
    "..#.#..",
    ".#.#.#.",
    "#..#..#",
    "...#...",
    "..###..",
];

const CAR: &[&str] = &[
    ".......",
    "...#...",
    ".#####.",
    ".#####.",
    ".#...#.",
];

const GUN: &[&str] = &[
    ".....#.....",
    ".....#.....",
    "....###....",
    "....###....",
    "...#.#.....",
    "...###.....",
    "...#####...",
];

/// One of the hardcoded brick pictures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Bird,
    Car,
    Gun,
}

impl Layout {
    /// Layout for a 1-based level number (out of range falls back to Bird)
    pub fn for_level(level: u32) -> Self {
        match level {
            2 => Layout::Car,
            3 => Layout::Gun,
            _ => Layout::Bird,
        }
    }

    pub fn pattern(&self) -> &'static [&'static str] {
        match self {
            Layout::Bird => BIRD,
            Layout::Car => CAR,
            Layout::Gun => GUN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Bird => "Bird",
            Layout::Car => "Car",
            Layout::Gun => "Gun",
        }
    }
}

/// Row-major grid of active bricks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl BrickGrid {
    /// Build a grid from a text pattern (all rows must have equal length)
    pub fn from_pattern(pattern: &[&str]) -> Self {
        let rows = pattern.len();
        let cols = pattern.first().map_or(0, |row| row.len());
        debug_assert!(pattern.iter().all(|row| row.len() == cols));

        let cells = pattern
            .iter()
            .flat_map(|row| row.bytes().map(|b| b == b'#'))
            .collect();

        Self { rows, cols, cells }
    }

    pub fn for_level(level: u32) -> Self {
        Self::from_pattern(Layout::for_level(level).pattern())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_active(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Deactivate a brick; returns false if it was already gone
    pub fn remove(&mut self, row: usize, col: usize) -> bool {
        if !self.is_active(row, col) {
            return false;
        }
        self.cells[row * self.cols + col] = false;
        true
    }

    /// Remove every brick (debug level skip)
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Left edge of column 0, centring the grid horizontally
    fn start_x(&self, field_width: f32) -> f32 {
        let cols = self.cols as f32;
        let grid_width = cols * BRICK_WIDTH + (cols - 1.0).max(0.0) * BRICK_GAP;
        (field_width - grid_width) / 2.0
    }

    /// Screen rectangle of a brick slot (active or not)
    pub fn brick_rect(&self, row: usize, col: usize, field_width: f32) -> Rect {
        Rect::new(
            self.start_x(field_width) + col as f32 * (BRICK_WIDTH + BRICK_GAP),
            BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_GAP),
            BRICK_WIDTH,
            BRICK_HEIGHT,
        )
    }

    /// Active bricks with their rectangles, row by row
    pub fn active(&self, field_width: f32) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_active(row, col))
            .map(move |(row, col)| (row, col, self.brick_rect(row, col, field_width)))
    }

    /// First active brick (row-major order) overlapped by the ball
    pub fn first_hit(
        &self,
        ball_pos: Vec2,
        radius: f32,
        field_width: f32,
    ) -> Option<(usize, usize, Rect)> {
        self.active(field_width)
            .find(|(_, _, rect)| circle_box_overlap(ball_pos, radius, rect))
    }
}
