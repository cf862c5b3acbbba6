use crate::backend::{DocumentRenderer, Frame, RectStyle, TextAlign, TextStyle, MM_PER_PT};
use crate::error::{PlanError, Result};
use crate::image::RasterImage;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
        align: TextAlign,
    },
    Image {
        page: usize,
        frame: Frame,
    },
    Rect {
        page: usize,
        frame: Frame,
        style: RectStyle,
    },
    NewPage,
}

impl DrawOp {
    pub fn page(&self) -> Option<usize> {
        match self {
            DrawOp::Text { page, .. } | DrawOp::Image { page, .. } | DrawOp::Rect { page, .. } => {
                Some(*page)
            }
            DrawOp::NewPage => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// In-memory [`DocumentRenderer`] that records every drawing call, so layout
/// can be checked without parsing PDF output.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    ops: Vec<DrawOp>,
    page: usize,
    unavailable: bool,
    fail_images: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer whose availability check fails.
    pub fn unavailable() -> Self {
        RecordingRenderer {
            unavailable: true,
            ..Self::default()
        }
    }

    /// A renderer that rejects every image.
    pub fn failing_images() -> Self {
        RecordingRenderer {
            fail_images: true,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl DocumentRenderer for RecordingRenderer {
    type Output = Recording;

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(PlanError::engine_unavailable("recording renderer disabled"));
        }
        Ok(())
    }

    /// Half an em per character.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        text.chars().count() as f64 * style.size * 0.5 * MM_PER_PT
    }

    fn add_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, align: TextAlign) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            text: text.to_string(),
            x,
            y,
            style: *style,
            align,
        });
    }

    fn add_image(&mut self, _image: &RasterImage, frame: Frame) -> Result<()> {
        if self.fail_images {
            return Err(PlanError::generation("image rejected"));
        }
        self.ops.push(DrawOp::Image {
            page: self.page,
            frame,
        });
        Ok(())
    }

    fn add_rect(&mut self, frame: Frame, style: RectStyle) {
        self.ops.push(DrawOp::Rect {
            page: self.page,
            frame,
            style,
        });
    }

    fn new_page(&mut self) -> Result<()> {
        self.ops.push(DrawOp::NewPage);
        self.page += 1;
        Ok(())
    }

    fn finish(self) -> Result<Recording> {
        Ok(Recording {
            page_count: self.page + 1,
            ops: self.ops,
        })
    }
}

/// Finished output of a [`RecordingRenderer`].
#[derive(Debug, Clone)]
pub struct Recording {
    pub ops: Vec<DrawOp>,
    pub page_count: usize,
}

impl Recording {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }

    /// Index in `ops` of the first text run equal to `text`.
    pub fn position_of(&self, text: &str) -> Option<usize> {
        self.ops.iter().position(|op| op.text() == Some(text))
    }

    pub fn find_text(&self, text: &str) -> Option<&DrawOp> {
        self.position_of(text).map(|i| &self.ops[i])
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn images(&self) -> impl Iterator<Item = &Frame> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Image { frame, .. } => Some(frame),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Frame> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { frame, .. } => Some(frame),
            _ => None,
        })
    }

    pub fn ops_on_page(&self, page: usize) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| op.page() == Some(page))
    }
}
