use crate::error::Result;
use crate::graphics::Color;
use crate::image::RasterImage;

/// Millimetres per PDF point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Text styling: size in points, weight and fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub fn normal(size: f64, color: Color) -> Self {
        TextStyle {
            size,
            weight: FontWeight::Normal,
            color,
        }
    }

    pub fn bold(size: f64, color: Color) -> Self {
        TextStyle {
            size,
            weight: FontWeight::Bold,
            color,
        }
    }

    /// Baseline-to-baseline distance in millimetres.
    pub fn line_height(&self) -> f64 {
        self.size * 1.15 * MM_PER_PT
    }
}

/// Horizontal anchor of a text run relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// An axis-aligned box in millimetres. (x, y) is the upper-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectStyle {
    Fill(Color),
    Stroke(Color),
    FillStroke { fill: Color, stroke: Color },
}

/// Drawing capability the plan layout paints through.
///
/// Coordinates are millimetres with a top-left origin; text `y` is the
/// baseline. Only image placement and page management can fail; the other
/// drawing calls are infallible.
pub trait DocumentRenderer {
    /// The finished artifact, e.g. PDF bytes.
    type Output;

    /// Checked once before anything is drawn.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    /// Width of `text` in millimetres when drawn with `style`.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64;

    fn add_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, align: TextAlign);

    fn add_image(&mut self, image: &RasterImage, frame: Frame) -> Result<()>;

    fn add_rect(&mut self, frame: Frame, style: RectStyle);

    /// Finalise the current page and start an empty one.
    fn new_page(&mut self) -> Result<()>;

    fn finish(self) -> Result<Self::Output>;
}
