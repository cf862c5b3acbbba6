use serde::{Deserialize, Serialize};

use crate::backend::{DocumentRenderer, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PageGeometry {
    /// A4 portrait with a 20 mm margin.
    fn default() -> Self {
        PageGeometry {
            width: 210.0,
            height: 297.0,
            margin: 20.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a block may reach.
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margin
    }

    pub fn right_limit(&self) -> f64 {
        self.width - self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLayout {
    pub height: f64,
    pub reserve: f64,
    pub advance: f64,
}

impl Default for ImageLayout {
    fn default() -> Self {
        ImageLayout {
            height: 50.0,
            reserve: 60.0,
            advance: 55.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub box_width: f64,
    pub box_height: f64,
    pub spacing: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout {
            box_width: 30.0,
            box_height: 20.0,
            spacing: 5.0,
        }
    }
}

/// Tunable layout parameters, all in millimetres.
///
/// Reserve heights are tuning knobs, not measurements: a section asks for its
/// reserve before its heading is drawn and moves to a fresh page if the
/// reserve does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page: PageGeometry,
    /// Reserve before an ordinary section heading.
    pub section_reserve: f64,
    /// Reserve before a heading that leads a wide block such as the package
    /// box or the level grid.
    pub block_section_reserve: f64,
    /// Reserve before the explainer and the team rewards table.
    pub large_section_reserve: f64,
    /// Reserve before a bullet list heading.
    pub list_reserve: f64,
    /// Vertical advance per bullet line.
    pub bullet_advance: f64,
    /// Space a bullet asks for before being drawn.
    pub bullet_reserve: f64,
    /// Reserve and advance of a wrapped explainer point.
    pub point_reserve: f64,
    pub point_advance: f64,
    /// Extra space after a wrapped paragraph.
    pub paragraph_gap: f64,
    pub image: ImageLayout,
    pub level_grid: GridLayout,
    pub team_row_height: f64,
    pub team_row_advance: f64,
    /// Distance of the footer baseline from the bottom page edge.
    pub footer_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page: PageGeometry::default(),
            section_reserve: 40.0,
            block_section_reserve: 50.0,
            large_section_reserve: 80.0,
            list_reserve: 30.0,
            bullet_advance: 6.0,
            bullet_reserve: 7.0,
            point_reserve: 10.0,
            point_advance: 7.0,
            paragraph_gap: 5.0,
            image: ImageLayout::default(),
            level_grid: GridLayout::default(),
            team_row_height: 10.0,
            team_row_advance: 12.0,
            footer_offset: 15.0,
        }
    }
}

/// Vertical position and page index of an in-progress render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub y: f64,
    pub page_index: usize,
}

impl RenderCursor {
    pub fn new(page: &PageGeometry) -> Self {
        RenderCursor {
            y: page.margin,
            page_index: 0,
        }
    }

    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Move to the top of the next page.
    pub fn break_page(&mut self, page: &PageGeometry) {
        self.y = page.margin;
        self.page_index += 1;
    }
}

/// Greedy fit test: does a block of `required` height starting at `y`
/// cross the bottom margin?
pub fn needs_page_break(y: f64, required: f64, page: &PageGeometry) -> bool {
    y + required > page.bottom_limit()
}

/// Number of fixed-width boxes that fit on one row of `content_width`.
pub fn boxes_per_row(content_width: f64, box_width: f64, spacing: f64) -> usize {
    if box_width > content_width {
        return 1;
    }
    ((content_width + spacing) / (box_width + spacing)).floor() as usize
}

/// Outcome of asking the grid for the next box slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridSlot {
    /// The box continues the current row at this x.
    SameRow(f64),
    /// A new row was started; the caller moves down before drawing at x.
    NewRow(f64),
}

/// Left-to-right placement of fixed-width boxes with row wrapping.
#[derive(Debug, Clone, Copy)]
pub struct GridCursor {
    left: f64,
    right_limit: f64,
    grid: GridLayout,
    x: f64,
    placed_in_row: usize,
}

impl GridCursor {
    pub fn new(page: &PageGeometry, grid: GridLayout) -> Self {
        GridCursor {
            left: page.margin,
            right_limit: page.right_limit(),
            grid,
            x: page.margin,
            placed_in_row: 0,
        }
    }

    /// Reserve the slot for the next box.
    pub fn next_slot(&mut self) -> GridSlot {
        let wraps = self.placed_in_row > 0 && self.x + self.grid.box_width > self.right_limit;
        let slot = if wraps {
            self.x = self.left;
            self.placed_in_row = 0;
            GridSlot::NewRow(self.x)
        } else {
            GridSlot::SameRow(self.x)
        };
        self.x += self.grid.box_width + self.grid.spacing;
        self.placed_in_row += 1;
        slot
    }

    /// Vertical distance between two rows.
    pub fn row_advance(&self) -> f64 {
        self.grid.box_height + self.grid.spacing
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// A single word wider than `max_width` occupies a line of its own.
pub fn wrap_text<R: DocumentRenderer>(
    renderer: &R,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", line, word);
            if renderer.measure_text(&candidate, style) > max_width {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            } else {
                line = candidate;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}
