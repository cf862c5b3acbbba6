use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use mininghub_core::backend::{DocumentRenderer, Frame, RectStyle, TextAlign, TextStyle};
use mininghub_core::config::PdfConfig;
use mininghub_core::graphics::Color;
use mininghub_core::image::{ColorSpace, ImagePixels, RasterImage};
use mininghub_core::layout::PageGeometry;
use mininghub_core::{
    generate_plan_pdf, render_plan_pdf, AppConfig, PdfBackend, PlanContent, PlanError,
    RenderOptions,
};

fn uncompressed() -> PdfConfig {
    PdfConfig {
        compress: false,
        ..PdfConfig::default()
    }
}

fn backend() -> PdfBackend {
    PdfBackend::new(PageGeometry::default(), &uncompressed(), None).unwrap()
}

fn output(backend: PdfBackend) -> String {
    let bytes = backend.finish().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn rgba_image() -> RasterImage {
    RasterImage {
        width: 2,
        height: 1,
        pixels: ImagePixels::Raw {
            color_space: ColorSpace::DeviceRGB,
            samples: vec![255, 0, 0, 0, 255, 0],
            alpha: Some(vec![255, 128]),
        },
    }
}

// -------------------------------------------------------
// Document structure
// -------------------------------------------------------

#[test]
fn empty_document_is_well_formed() {
    let out = output(backend());
    assert!(out.starts_with("%PDF-1.7"));
    assert!(out.contains("/Type /Catalog /Pages 2 0 R"));
    assert!(out.contains("/Count 1"));
    assert!(out.contains("/MediaBox [0 0 595.2756 841.8898]"));
    assert!(out.contains("/BaseFont /Helvetica /Encoding /WinAnsiEncoding"));
    assert!(out.contains("/BaseFont /Helvetica-Bold"));
    assert!(out.contains("(MiningHub Investment Plan)"));
    assert!(out.contains("startxref"));
    assert!(out.ends_with("%%EOF\n"));
}

#[test]
fn new_page_adds_pages() {
    let mut doc = backend();
    assert_eq!(doc.page_count(), 1);
    doc.new_page().unwrap();
    doc.new_page().unwrap();
    assert_eq!(doc.page_count(), 3);
    let out = output(doc);
    assert!(out.contains("/Count 3"));
    assert_eq!(out.matches("/Type /Page /Parent").count(), 3);
}

#[test]
fn text_is_placed_in_content_stream() {
    let mut doc = backend();
    let style = TextStyle::bold(12.0, Color::BLACK);
    doc.add_text("Plan (v1)", 20.0, 30.0, &style, TextAlign::Left);
    let out = output(doc);
    assert!(out.contains("/F2 12 Tf"));
    assert!(out.contains("0 0 0 rg"));
    assert!(out.contains("(Plan \\(v1\\)) Tj"));
}

#[test]
fn text_outside_win_ansi_is_replaced() {
    let mut doc = backend();
    let style = TextStyle::normal(9.0, Color::gray8(100));
    doc.add_text("लेवल 1", 20.0, 30.0, &style, TextAlign::Center);
    doc.add_text("© 2025", 20.0, 40.0, &style, TextAlign::Left);
    let bytes = doc.finish().unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.contains("(???? 1) Tj"));
    let copyright = [b'(', 0xA9, b' ', b'2', b'0', b'2', b'5', b')'];
    assert!(bytes.windows(copyright.len()).any(|w| w == copyright));
}

#[test]
fn measure_uses_helvetica_widths() {
    let doc = backend();
    let style = TextStyle::normal(10.0, Color::BLACK);
    // "$" is 556/1000 em: 5.56pt.
    let width = doc.measure_text("$", &style);
    assert!((width - 5.56 * 25.4 / 72.0).abs() < 1e-9);
    let bold = doc.measure_text("MiningHub", &TextStyle::bold(10.0, Color::BLACK));
    assert!(bold > doc.measure_text("MiningHub", &style));
}

#[test]
fn rect_styles_use_matching_paint_operators() {
    let mut doc = backend();
    let frame = Frame::new(20.0, 20.0, 170.0, 30.0);
    doc.add_rect(frame, RectStyle::Fill(Color::rgb8(240, 248, 255)));
    doc.add_rect(frame, RectStyle::Stroke(Color::rgb8(34, 139, 34)));
    doc.add_rect(
        frame,
        RectStyle::FillStroke {
            fill: Color::WHITE,
            stroke: Color::BLACK,
        },
    );
    let out = output(doc);
    assert!(out.contains(" re\nf\n"));
    assert!(out.contains(" re\nS\n"));
    assert!(out.contains(" re\nB\n"));
    assert!(out.contains("0.5669 w"));
}

fn position(haystack: &[u8], needle: &[u8], from: usize) -> usize {
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
        .unwrap()
}

#[test]
fn compressed_content_is_flate_encoded() {
    let mut doc = PdfBackend::new(PageGeometry::default(), &PdfConfig::default(), None).unwrap();
    doc.add_text("Hidden", 20.0, 30.0, &TextStyle::normal(12.0, Color::BLACK), TextAlign::Left);
    let bytes = doc.finish().unwrap();

    let filter = position(&bytes, b"/Filter /FlateDecode", 0);
    let start = position(&bytes, b"stream\n", filter) + b"stream\n".len();
    let end = position(&bytes, b"\nendstream", start);
    let mut content = String::new();
    ZlibDecoder::new(&bytes[start..end])
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains("(Hidden) Tj"));
    assert!(content.contains("/F1 12 Tf"));
}

#[test]
fn repeated_text_compresses_below_its_raw_size() {
    let style = TextStyle::normal(12.0, Color::BLACK);
    let draw = |config: &PdfConfig| {
        let mut doc = PdfBackend::new(PageGeometry::default(), config, None).unwrap();
        for i in 0..40 {
            doc.add_text("Hidden", 20.0, 30.0 + i as f64 * 5.0, &style, TextAlign::Left);
        }
        doc.finish().unwrap()
    };
    let compressed = draw(&PdfConfig::default());
    let raw = draw(&uncompressed());
    assert!(compressed.len() < raw.len());
    assert!(!String::from_utf8_lossy(&compressed).contains("(Hidden) Tj"));
}

// -------------------------------------------------------
// Images
// -------------------------------------------------------

#[test]
fn raw_image_with_alpha_gets_soft_mask() {
    let mut doc = backend();
    doc.add_image(&rgba_image(), Frame::new(20.0, 45.0, 170.0, 50.0)).unwrap();
    let out = output(doc);
    assert!(out.contains("/Subtype /Image /Width 2 /Height 1"));
    assert!(out.contains("/ColorSpace /DeviceRGB"));
    assert!(out.contains("/SMask"));
    assert!(out.contains("/Im1 Do"));
    assert!(out.contains("/XObject << /Im1"));
}

#[test]
fn jpeg_image_is_passed_through() {
    let mut doc = backend();
    let image = RasterImage {
        width: 16,
        height: 8,
        pixels: ImagePixels::Jpeg {
            color_space: ColorSpace::DeviceRGB,
            data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        },
    };
    doc.add_image(&image, Frame::new(20.0, 20.0, 40.0, 20.0)).unwrap();
    let out = output(doc);
    assert!(out.contains("/Filter /DCTDecode"));
    assert!(!out.contains("/SMask"));
}

#[test]
fn mismatched_samples_are_a_generation_error() {
    let mut doc = backend();
    let image = RasterImage {
        width: 4,
        height: 4,
        pixels: ImagePixels::Raw {
            color_space: ColorSpace::DeviceGray,
            samples: vec![0; 3],
            alpha: None,
        },
    };
    let err = doc.add_image(&image, Frame::new(20.0, 20.0, 10.0, 10.0)).unwrap_err();
    assert!(matches!(err, PlanError::Generation { .. }));
}

// -------------------------------------------------------
// Whole plan
// -------------------------------------------------------

#[test]
fn plan_pdf_is_deterministic() {
    let content = PlanContent::mininghub();
    let config = AppConfig::default();
    let options = RenderOptions { year: 2025 };
    let first = render_plan_pdf(&content, None, &config, &options).unwrap();
    let second = render_plan_pdf(&content, None, &config, &options).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with(b"%PDF-1.7"));
}

#[test]
fn plan_pdf_page_tree_matches_pages() {
    let content = PlanContent::mininghub();
    let mut config = AppConfig::default();
    config.pdf.compress = false;
    let bytes = render_plan_pdf(&content, None, &config, &RenderOptions { year: 2025 }).unwrap();
    let out = String::from_utf8_lossy(&bytes);

    let pages = out.matches("/Type /Page /Parent").count();
    assert!(pages > 1, "plan should span several pages");
    assert!(out.contains(&format!("/Count {}", pages)));
    assert!(out.contains("(MiningHub) Tj"));
    assert!(out.contains(" 2025 MiningHub. All rights reserved.) Tj"));
}

#[test]
fn missing_font_makes_engine_unavailable() {
    let mut config = AppConfig::default();
    config.assets.font = Some(Path::new("/nonexistent/mininghub.ttf").to_path_buf());
    let err = render_plan_pdf(
        &PlanContent::mininghub(),
        None,
        &config,
        &RenderOptions { year: 2025 },
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::EngineUnavailable { .. }));
}

#[test]
fn corrupt_font_makes_engine_unavailable() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"definitely not a font").unwrap();
    let result = PdfBackend::new(PageGeometry::default(), &uncompressed(), Some(file.path()));
    assert!(matches!(result, Err(PlanError::EngineUnavailable { .. })));
}

// -------------------------------------------------------
// Generation from configured assets
// -------------------------------------------------------

fn write_rgb_png(path: &Path) {
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), 2, 2);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[90; 12]).unwrap();
    writer.finish().unwrap();
}

#[tokio::test]
async fn generation_without_assets_still_produces_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.pdf.compress = false;
    config.assets.crypto_mining_image = dir.path().join("missing-crypto.png");
    config.assets.blockchain_dev_image = dir.path().join("missing-blockchain.png");

    let bytes = generate_plan_pdf(&PlanContent::mininghub(), &config).await.unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.starts_with("%PDF-1.7"));
    assert!(out.matches("/Type /Page /Parent").count() > 1);
    assert!(!out.contains("/XObject"));
    assert!(out.contains("(MiningHub) Tj"));
}

#[tokio::test]
async fn generation_embeds_both_configured_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.pdf.compress = false;
    config.assets.crypto_mining_image = dir.path().join("crypto.png");
    config.assets.blockchain_dev_image = dir.path().join("blockchain.png");
    write_rgb_png(&config.assets.crypto_mining_image);
    write_rgb_png(&config.assets.blockchain_dev_image);

    let bytes = generate_plan_pdf(&PlanContent::mininghub(), &config).await.unwrap();
    let out = String::from_utf8_lossy(&bytes);
    assert!(out.contains("/Im1 Do"));
    assert!(out.contains("/Im2 Do"));
    assert_eq!(out.matches("/Subtype /Image").count(), 2);
}
