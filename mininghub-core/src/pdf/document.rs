use std::io::{self, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::backend::{
    DocumentRenderer, FontWeight, Frame, RectStyle, TextAlign, TextStyle, MM_PER_PT,
};
use crate::config::PdfConfig;
use crate::error::{PlanError, Result};
use crate::graphics::Color;
use crate::image::{ColorSpace, ImagePixels, RasterImage};
use crate::layout::PageGeometry;
use crate::pdf::fonts::{self, BOLD_RESOURCE, REGULAR_RESOURCE};
use crate::pdf::objects::{ObjId, PdfObject};
use crate::pdf::truetype::EmbeddedFont;
use crate::pdf::writer::{escape_literal, format_number, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1);
const PAGES_OBJ: ObjId = ObjId(2);
const FONT_REGULAR_OBJ: ObjId = ObjId(3);
const FONT_BOLD_OBJ: ObjId = ObjId(4);
const FIRST_FREE_OBJ: u32 = 5;

/// Stroke width of box outlines, in millimetres.
const OUTLINE_WIDTH_MM: f64 = 0.2;

fn pt(mm: f64) -> f64 {
    mm / MM_PER_PT
}

enum TextFont {
    /// Helvetica and Helvetica-Bold, WinAnsi encoded.
    Builtin,
    /// One embedded face used for both weights.
    Embedded(Box<EmbeddedFont>),
}

/// PDF drawing engine behind [`DocumentRenderer`].
///
/// Pages are written as soon as they are finished; only the open page's
/// content stream is held in memory. Output contains no timestamps, so
/// identical drawing calls give identical bytes.
pub struct PdfBackend {
    writer: PdfWriter<Vec<u8>>,
    page: PageGeometry,
    compress: bool,
    title: String,
    font: TextFont,
    page_ids: Vec<ObjId>,
    content: Vec<u8>,
    page_images: Vec<(String, ObjId)>,
    image_count: usize,
    next_obj: u32,
}

impl PdfBackend {
    /// Start a document with builtin fonts, or with an embedded TrueType
    /// font when `font_path` is given. A font that cannot be loaded makes
    /// the engine unavailable.
    pub fn new(page: PageGeometry, config: &PdfConfig, font_path: Option<&Path>) -> Result<Self> {
        let font = match font_path {
            Some(path) => TextFont::Embedded(Box::new(EmbeddedFont::from_file(path)?)),
            None => TextFont::Builtin,
        };
        let builtin = matches!(font, TextFont::Builtin);
        let writer =
            start_writer(builtin).map_err(|e| PlanError::engine_unavailable(e.to_string()))?;

        Ok(PdfBackend {
            writer,
            page,
            compress: config.compress,
            title: config.title.clone(),
            font,
            page_ids: Vec::new(),
            content: Vec::new(),
            page_images: Vec::new(),
            image_count: 0,
            next_obj: FIRST_FREE_OBJ,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len() + 1
    }

    fn alloc(&mut self) -> ObjId {
        let id = ObjId(self.next_obj);
        self.next_obj += 1;
        id
    }

    fn op(&mut self, s: &str) {
        self.content.extend_from_slice(s.as_bytes());
        self.content.push(b'\n');
    }

    fn set_fill(&mut self, c: Color) {
        let s = format!("{} {} {} rg", format_number(c.r), format_number(c.g), format_number(c.b));
        self.op(&s);
    }

    fn set_stroke(&mut self, c: Color) {
        let s = format!("{} {} {} RG", format_number(c.r), format_number(c.g), format_number(c.b));
        self.op(&s);
    }

    /// `x y w h re` for a top-left millimetre frame.
    fn rect_op(&self, frame: &Frame) -> String {
        format!(
            "{} {} {} {} re",
            format_number(pt(frame.x)),
            format_number(pt(self.page.height - frame.bottom())),
            format_number(pt(frame.width)),
            format_number(pt(frame.height)),
        )
    }

    fn write_stream(
        &mut self,
        id: ObjId,
        mut dict: Vec<(&str, PdfObject)>,
        data: Vec<u8>,
        compress: bool,
    ) -> io::Result<()> {
        let data = if compress {
            dict.push(("Filter", PdfObject::name("FlateDecode")));
            deflate(&data)?
        } else {
            data
        };
        self.writer.write_object(id, &PdfObject::stream(dict, data))
    }

    /// Write the open page's content stream and page dictionary.
    fn flush_page(&mut self) -> io::Result<()> {
        let content_id = self.alloc();
        let page_id = self.alloc();

        let ops = std::mem::take(&mut self.content);
        self.write_stream(content_id, vec![], ops, self.compress)?;

        let bold_obj = match self.font {
            TextFont::Builtin => FONT_BOLD_OBJ,
            TextFont::Embedded(_) => FONT_REGULAR_OBJ,
        };
        let mut resources = vec![(
            "Font",
            PdfObject::dict(vec![
                (REGULAR_RESOURCE, PdfObject::Reference(FONT_REGULAR_OBJ)),
                (BOLD_RESOURCE, PdfObject::Reference(bold_obj)),
            ]),
        )];
        let images = std::mem::take(&mut self.page_images);
        if !images.is_empty() {
            resources.push((
                "XObject",
                PdfObject::Dictionary(
                    images
                        .into_iter()
                        .map(|(name, id)| (name, PdfObject::Reference(id)))
                        .collect(),
                ),
            ));
        }

        let page = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Reference(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::reals(&[0.0, 0.0, pt(self.page.width), pt(self.page.height)]),
            ),
            ("Contents", PdfObject::Reference(content_id)),
            ("Resources", PdfObject::dict(resources)),
        ]);
        self.writer.write_object(page_id, &page)?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Type0 font, CID descendant, descriptor, font file and ToUnicode map.
    fn write_embedded_font(&mut self) -> io::Result<()> {
        let TextFont::Embedded(font) = std::mem::replace(&mut self.font, TextFont::Builtin) else {
            return Ok(());
        };
        let cid_id = self.alloc();
        let descriptor_id = self.alloc();
        let file_id = self.alloc();
        let to_unicode_id = self.alloc();

        let data = font.font_data().to_vec();
        let length1 = data.len() as i64;
        let file_dict = vec![("Length1", PdfObject::Integer(length1))];
        self.write_stream(file_id, file_dict, data, self.compress)?;
        self.writer.write_object(
            descriptor_id,
            &font.descriptor(PdfObject::Reference(file_id)),
        )?;
        let cmap = font.to_unicode_cmap();
        self.write_stream(to_unicode_id, vec![], cmap, self.compress)?;

        let cid_font = PdfObject::dict(vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("CIDFontType2")),
            ("BaseFont", PdfObject::name(&font.postscript_name)),
            (
                "CIDSystemInfo",
                PdfObject::dict(vec![
                    ("Registry", PdfObject::text("Adobe")),
                    ("Ordering", PdfObject::text("Identity")),
                    ("Supplement", PdfObject::Integer(0)),
                ]),
            ),
            ("FontDescriptor", PdfObject::Reference(descriptor_id)),
            ("W", font.width_array()),
            ("CIDToGIDMap", PdfObject::name("Identity")),
        ]);
        self.writer.write_object(cid_id, &cid_font)?;

        let type0 = PdfObject::dict(vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("Type0")),
            ("BaseFont", PdfObject::name(&font.postscript_name)),
            ("Encoding", PdfObject::name("Identity-H")),
            ("DescendantFonts", PdfObject::Array(vec![PdfObject::Reference(cid_id)])),
            ("ToUnicode", PdfObject::Reference(to_unicode_id)),
        ]);
        self.writer.write_object(FONT_REGULAR_OBJ, &type0)
    }

    fn embed_image(&mut self, image: &RasterImage) -> Result<ObjId> {
        let id = self.alloc();
        let mut dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(image.width as i64)),
            ("Height", PdfObject::Integer(image.height as i64)),
            ("BitsPerComponent", PdfObject::Integer(8)),
        ];
        let pixel_count = image.width as usize * image.height as usize;
        let io_err = |e: io::Error| PlanError::generation(format!("image embedding failed: {}", e));

        match &image.pixels {
            ImagePixels::Jpeg { color_space, data } => {
                dict.push(("ColorSpace", PdfObject::name(color_space.pdf_name())));
                dict.push(("Filter", PdfObject::name("DCTDecode")));
                self.writer
                    .write_object(id, &PdfObject::stream(dict, data.clone()))
                    .map_err(io_err)?;
            }
            ImagePixels::Raw {
                color_space,
                samples,
                alpha,
            } => {
                let channels = match color_space {
                    ColorSpace::DeviceRGB => 3,
                    ColorSpace::DeviceGray => 1,
                };
                if samples.len() != pixel_count * channels {
                    return Err(PlanError::generation(format!(
                        "image has {} samples, expected {}",
                        samples.len(),
                        pixel_count * channels
                    )));
                }
                dict.push(("ColorSpace", PdfObject::name(color_space.pdf_name())));
                if let Some(alpha) = alpha {
                    if alpha.len() != pixel_count {
                        return Err(PlanError::generation("alpha plane size mismatch"));
                    }
                    let mask_id = self.alloc();
                    let mask = vec![
                        ("Type", PdfObject::name("XObject")),
                        ("Subtype", PdfObject::name("Image")),
                        ("Width", PdfObject::Integer(image.width as i64)),
                        ("Height", PdfObject::Integer(image.height as i64)),
                        ("ColorSpace", PdfObject::name("DeviceGray")),
                        ("BitsPerComponent", PdfObject::Integer(8)),
                    ];
                    self.write_stream(mask_id, mask, alpha.clone(), true)
                        .map_err(io_err)?;
                    dict.push(("SMask", PdfObject::Reference(mask_id)));
                }
                self.write_stream(id, dict, samples.clone(), true)
                    .map_err(io_err)?;
            }
        }
        Ok(id)
    }
}

/// Header plus, for builtin text, the two shared Helvetica font objects.
fn start_writer(builtin: bool) -> io::Result<PdfWriter<Vec<u8>>> {
    let mut writer = PdfWriter::new(Vec::new());
    writer.write_header()?;
    if builtin {
        for (id, weight) in [
            (FONT_REGULAR_OBJ, FontWeight::Normal),
            (FONT_BOLD_OBJ, FontWeight::Bold),
        ] {
            let dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(fonts::base_font_name(weight))),
                ("Encoding", PdfObject::name("WinAnsiEncoding")),
            ]);
            writer.write_object(id, &dict)?;
        }
    }
    Ok(writer)
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

impl DocumentRenderer for PdfBackend {
    type Output = Vec<u8>;

    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        let points = match &self.font {
            TextFont::Builtin => fonts::measure_builtin(text, style.weight, style.size),
            TextFont::Embedded(font) => font.measure(text, style.size),
        };
        points * MM_PER_PT
    }

    fn add_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle, align: TextAlign) {
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.measure_text(text, style) / 2.0,
            TextAlign::Right => x - self.measure_text(text, style),
        };
        let shown = match &mut self.font {
            TextFont::Builtin => {
                let mut lit = vec![b'('];
                escape_literal(&fonts::encode_win_ansi(text), &mut lit);
                lit.push(b')');
                lit
            }
            TextFont::Embedded(font) => font.encode(text).into_bytes(),
        };
        self.op("BT");
        let font_op = format!(
            "/{} {} Tf",
            fonts::resource_name(style.weight),
            format_number(style.size)
        );
        self.op(&font_op);
        self.set_fill(style.color);
        let td = format!(
            "{} {} Td",
            format_number(pt(x)),
            format_number(pt(self.page.height - y))
        );
        self.op(&td);
        self.content.extend_from_slice(&shown);
        self.op(" Tj");
        self.op("ET");
    }

    fn add_image(&mut self, image: &RasterImage, frame: Frame) -> Result<()> {
        let id = self.embed_image(image)?;
        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let placement = format!(
            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ",
            format_number(pt(frame.width)),
            format_number(pt(frame.height)),
            format_number(pt(frame.x)),
            format_number(pt(self.page.height - frame.bottom())),
            name,
        );
        self.op(&placement);
        self.page_images.push((name, id));
        Ok(())
    }

    fn add_rect(&mut self, frame: Frame, style: RectStyle) {
        let re = self.rect_op(&frame);
        self.op("q");
        let paint = match style {
            RectStyle::Fill(fill) => {
                self.set_fill(fill);
                "f"
            }
            RectStyle::Stroke(stroke) => {
                self.set_stroke(stroke);
                "S"
            }
            RectStyle::FillStroke { fill, stroke } => {
                self.set_fill(fill);
                self.set_stroke(stroke);
                "B"
            }
        };
        if paint != "f" {
            let w = format!("{} w", format_number(pt(OUTLINE_WIDTH_MM)));
            self.op(&w);
        }
        self.op(&re);
        self.op(paint);
        self.op("Q");
    }

    fn new_page(&mut self) -> Result<()> {
        self.flush_page()
            .map_err(|e| PlanError::generation(format!("failed to write page: {}", e)))
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let generation =
            |e: io::Error| PlanError::generation(format!("failed to finish document: {}", e));
        self.flush_page().map_err(generation)?;
        self.write_embedded_font().map_err(generation)?;

        let info_id = self.alloc();
        let info = PdfObject::dict(vec![
            ("Title", PdfObject::text(&self.title)),
            ("Creator", PdfObject::text("mininghub")),
            ("Producer", PdfObject::text("mininghub-core")),
        ]);
        self.writer.write_object(info_id, &info).map_err(generation)?;

        let kids = self
            .page_ids
            .iter()
            .map(|id| PdfObject::Reference(*id))
            .collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages).map_err(generation)?;
        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog).map_err(generation)?;

        self.writer
            .finish(CATALOG_OBJ, Some(info_id))
            .map_err(generation)
    }
}
