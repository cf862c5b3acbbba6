use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{PlanError, Result};
use crate::pdf::objects::PdfObject;

/// A TrueType font embedded as a Type0 / Identity-H composite font so that
/// non-Latin copy survives into the PDF. Glyphs are selected one per code
/// point; no shaping is applied.
pub struct EmbeddedFont {
    pub(crate) postscript_name: String,
    data: Vec<u8>,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    cap_height: i16,
    bbox: [i16; 4],
    italic_angle: f64,
    flags: u32,
    stem_v: i16,
    cmap: BTreeMap<u32, u16>,
    advances: BTreeMap<u16, u16>,
    used: BTreeMap<u16, char>,
}

impl EmbeddedFont {
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            PlanError::engine_unavailable(format!("cannot read font {}: {}", path.display(), e))
        })?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| PlanError::engine_unavailable(format!("cannot parse font: {}", e)))?;

        let mut cmap = BTreeMap::new();
        let tables = face
            .tables()
            .cmap
            .ok_or_else(|| PlanError::engine_unavailable("font has no cmap table"))?;
        for subtable in tables.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let Some(gid) = subtable.glyph_index(cp) {
                    cmap.entry(cp).or_insert(gid.0);
                }
            });
        }

        let advances = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
                (gid, advance)
            })
            .collect();

        let postscript_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME && n.is_unicode())
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "EmbeddedFont".to_string());

        let ascent = face.ascender();
        let bbox = face.global_bounding_box();
        // FixedPitch (1), Nonsymbolic (32), Italic (64).
        let mut flags = 32;
        if face.is_monospaced() {
            flags |= 1;
        }
        if face.is_italic() {
            flags |= 64;
        }
        let weight = face.weight().to_number() as f64 / 1000.0;
        let units_per_em = face.units_per_em();
        let descent = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascent);
        let italic_angle = face.italic_angle() as f64;
        drop(face);

        Ok(EmbeddedFont {
            postscript_name: postscript_name.replace(' ', ""),
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            italic_angle,
            flags,
            stem_v: (10.0 + 220.0 * weight * weight) as i16,
            cmap,
            advances,
            used: BTreeMap::new(),
            data,
        })
    }

    fn glyph(&self, ch: char) -> u16 {
        self.cmap.get(&(ch as u32)).copied().unwrap_or(0)
    }

    /// Glyph advance in 1/1000 em.
    fn advance_units(&self, gid: u16) -> u32 {
        let raw = self.advances.get(&gid).copied().unwrap_or(0) as u32;
        raw * 1000 / self.units_per_em.max(1) as u32
    }

    fn scaled(&self, v: i16) -> i64 {
        v as i64 * 1000 / self.units_per_em.max(1) as i64
    }

    /// Width of `text` in points at `size`.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.advance_units(self.glyph(ch))).sum();
        units as f64 * size / 1000.0
    }

    /// Hex string of glyph IDs for a `Tj` operator; records glyph usage for
    /// the width array and ToUnicode map.
    pub fn encode(&mut self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4 + 2);
        hex.push('<');
        for ch in text.chars() {
            let gid = self.glyph(ch);
            self.used.entry(gid).or_insert(ch);
            hex.push_str(&format!("{:04X}", gid));
        }
        hex.push('>');
        hex
    }

    /// `/W` array covering every used glyph, runs of consecutive IDs grouped.
    pub fn width_array(&self) -> PdfObject {
        let gids: Vec<u16> = self.used.keys().copied().collect();
        let mut out = Vec::new();
        let mut i = 0;
        while i < gids.len() {
            let start = gids[i];
            let mut widths = Vec::new();
            while i < gids.len() && gids[i] as u32 == start as u32 + widths.len() as u32 {
                widths.push(PdfObject::Integer(self.advance_units(gids[i]) as i64));
                i += 1;
            }
            out.push(PdfObject::Integer(start as i64));
            out.push(PdfObject::Array(widths));
        }
        PdfObject::Array(out)
    }

    pub fn descriptor(&self, font_file: PdfObject) -> PdfObject {
        PdfObject::dict(vec![
            ("Type", PdfObject::name("FontDescriptor")),
            ("FontName", PdfObject::name(&self.postscript_name)),
            ("Flags", PdfObject::Integer(self.flags as i64)),
            (
                "FontBBox",
                PdfObject::Array(
                    self.bbox
                        .iter()
                        .map(|v| PdfObject::Integer(self.scaled(*v)))
                        .collect(),
                ),
            ),
            ("ItalicAngle", PdfObject::Real(self.italic_angle)),
            ("Ascent", PdfObject::Integer(self.scaled(self.ascent))),
            ("Descent", PdfObject::Integer(self.scaled(self.descent))),
            ("CapHeight", PdfObject::Integer(self.scaled(self.cap_height))),
            ("StemV", PdfObject::Integer(self.stem_v as i64)),
            ("FontFile2", font_file),
        ])
    }

    pub fn font_data(&self) -> &[u8] {
        &self.data
    }

    /// ToUnicode CMap mapping each used glyph back to its character.
    pub fn to_unicode_cmap(&self) -> Vec<u8> {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );
        let pairs: Vec<(&u16, &char)> = self.used.iter().collect();
        for chunk in pairs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, ch) in chunk {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{:04X}", u))
                    .collect();
                cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
        cmap.into_bytes()
    }
}
