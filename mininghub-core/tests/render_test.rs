use mininghub_core::assets::HeroImages;
use mininghub_core::backend::RectStyle;
use mininghub_core::image::{ColorSpace, ImagePixels, RasterImage};
use mininghub_core::layout::LayoutConfig;
use mininghub_core::recording::{DrawOp, Recording, RecordingRenderer};
use mininghub_core::render::paint_plan;
use mininghub_core::backend::Frame;
use mininghub_core::{
    render_plan, AppConfig, PlanContent, PlanError, RenderOptions, TextAlign,
};

const OPTIONS: RenderOptions = RenderOptions { year: 2025 };

fn tiny_image() -> RasterImage {
    RasterImage {
        width: 2,
        height: 2,
        pixels: ImagePixels::Raw {
            color_space: ColorSpace::DeviceRGB,
            samples: vec![128; 12],
            alpha: None,
        },
    }
}

fn hero_images() -> HeroImages {
    HeroImages {
        crypto_mining: tiny_image(),
        blockchain_dev: tiny_image(),
    }
}

fn record(content: &PlanContent, images: Option<&HeroImages>) -> Recording {
    render_plan(
        RecordingRenderer::new(),
        content,
        images,
        &LayoutConfig::default(),
        &OPTIONS,
    )
    .unwrap()
}

/// Plan content long enough to need several pages.
fn long_content() -> PlanContent {
    let mut content = PlanContent::mininghub();
    content.description = vec![content.description.as_str(); 8].join(" ");
    content.services = (1..=120).map(|i| format!("सेवा {}", i)).collect();
    content.level_income = (1..=17)
        .map(|level| mininghub_core::content::LevelIncome {
            level,
            percentage: 1.0,
        })
        .collect();
    content.team_rewards = (1..=40)
        .map(|i| mininghub_core::content::TeamReward {
            team_size: i * 100,
            monthly_reward: i as f64 * 10.0,
        })
        .collect();
    content
}

fn image_positions(rec: &Recording) -> Vec<usize> {
    rec.ops
        .iter()
        .enumerate()
        .filter(|(_, op)| matches!(op, DrawOp::Image { .. }))
        .map(|(i, _)| i)
        .collect()
}

// -------------------------------------------------------
// Section order
// -------------------------------------------------------

#[test]
fn sections_are_drawn_in_order() {
    let content = PlanContent::mininghub();
    let rec = record(&content, None);
    let copy = &content.pdf_copy;
    let explainer = &content.crypto_mining_explainer;
    let titles: [&str; 16] = [
        content.name.as_str(),
        &content.tagline,
        &copy.about_title,
        &copy.services_title,
        &copy.benefits_title,
        &explainer.title,
        &explainer.what_is_mining.title,
        &explainer.how_it_works.title,
        &copy.package_title,
        &copy.referral_title,
        &copy.level_income_title,
        &copy.team_rewards_title,
        &copy.deposit_withdrawal_title,
        &copy.income_calculator_title,
        "© 2025 MiningHub. All rights reserved.",
        &copy.footer_generated,
    ];
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| rec.position_of(t).unwrap_or_else(|| panic!("missing {:?}", t)))
        .collect();
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1], "out of order: {:?}", positions);
    }
}

#[test]
fn hero_images_bracket_about_section() {
    let content = PlanContent::mininghub();
    let images = hero_images();
    let rec = record(&content, Some(&images));
    let copy = &content.pdf_copy;

    let found = image_positions(&rec);
    assert_eq!(found.len(), 2);
    let tagline = rec.position_of(&content.tagline).unwrap();
    let about = rec.position_of(&copy.about_title).unwrap();
    let last_benefit = rec.position_of(content.benefits.last().unwrap()).unwrap();
    let explainer = rec.position_of(&content.crypto_mining_explainer.title).unwrap();
    assert!(tagline < found[0] && found[0] < about);
    assert!(last_benefit < found[1] && found[1] < explainer);

    for frame in rec.images() {
        assert_eq!(frame.x, 20.0);
        assert_eq!(frame.width, 170.0);
        assert_eq!(frame.height, 50.0);
    }
}

#[test]
fn computed_amounts_are_printed() {
    let content = PlanContent::mininghub();
    let rec = record(&content, None);
    for text in [
        "$20",
        "$0.6",
        "$18",
        "प्रत्यक्ष रेफरल पुरस्कार: $2",
        "लेवल 1",
        "5%",
        "100 सदस्य",
        "$180 प्रति माह",
        "USDT BEP20",
        "निवेश: $20",
        "दैनिक कमाई: $0.6",
        "मासिक कमाई: $18",
    ] {
        assert!(rec.position_of(text).is_some(), "missing {:?}", text);
    }
}

// -------------------------------------------------------
// Pagination
// -------------------------------------------------------

#[test]
fn long_content_stays_inside_margins() {
    let layout = LayoutConfig::default();
    let page = layout.page;
    let rec = record(&long_content(), Some(&hero_images()));
    assert!(rec.page_count > 3, "expected several pages, got {}", rec.page_count);

    let (body, footer) = rec.ops.split_at(rec.ops.len() - 2);
    assert!(footer[0].text().unwrap().starts_with('©'));
    for op in body {
        match op {
            DrawOp::Text { text, y, .. } => {
                assert!(*y >= page.margin, "{:?} above top margin at {}", text, y);
                assert!(*y <= page.bottom_limit(), "{:?} below bottom margin at {}", text, y);
            }
            DrawOp::Rect { frame, .. } | DrawOp::Image { frame, .. } => {
                assert!(frame.y >= page.margin);
                assert!(frame.bottom() <= page.bottom_limit() + 1e-6, "{:?}", frame);
            }
            DrawOp::NewPage => {}
        }
    }

    let new_pages = rec.ops.iter().filter(|op| **op == DrawOp::NewPage).count();
    assert_eq!(new_pages + 1, rec.page_count);
}

fn overlaps(a: &Frame, b: &Frame) -> bool {
    const EPS: f64 = 1e-6;
    a.x < b.right() - EPS
        && b.x < a.right() - EPS
        && a.y < b.bottom() - EPS
        && b.y < a.bottom() - EPS
}

#[test]
fn blocks_taller_than_their_reserve_still_fit() {
    let config = AppConfig::from_toml_str(
        "[layout]\nblock_section_reserve = 5.0\nteam_row_height = 14.0\nteam_row_advance = 6.0\n\
         [layout.image]\nheight = 250.0\nreserve = 60.0\nadvance = 55.0",
    )
    .unwrap();
    let page = config.layout.page;
    let rec = render_plan(
        RecordingRenderer::new(),
        &long_content(),
        Some(&hero_images()),
        &config.layout,
        &OPTIONS,
    )
    .unwrap();
    assert_eq!(rec.images().count(), 2);

    let mut frames: Vec<(usize, Frame)> = Vec::new();
    for op in &rec.ops {
        if let DrawOp::Rect { page: index, frame, .. } | DrawOp::Image { page: index, frame } = op {
            assert!(frame.y >= page.margin, "{:?} above top margin", frame);
            assert!(
                frame.bottom() <= page.bottom_limit() + 1e-6,
                "page {} frame bottom {} below {}",
                index,
                frame.bottom(),
                page.bottom_limit()
            );
            frames.push((*index, *frame));
        }
    }
    for (i, (page_a, a)) in frames.iter().enumerate() {
        for (page_b, b) in &frames[i + 1..] {
            assert!(page_a != page_b || !overlaps(a, b), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn footer_is_pinned_on_last_page() {
    let rec = record(&long_content(), None);
    let last_page = rec.page_count - 1;
    match rec.find_text("© 2025 MiningHub. All rights reserved.") {
        Some(DrawOp::Text { page, x, y, .. }) => {
            assert_eq!(*page, last_page);
            assert_eq!(*x, 20.0);
            assert_eq!(*y, 282.0);
        }
        other => panic!("footer not found: {:?}", other),
    }
    let footer_ops = rec.ops_on_page(last_page).filter(|op| match op {
        DrawOp::Text { y, .. } => *y == 282.0,
        _ => false,
    });
    assert_eq!(footer_ops.count(), 2);
}

#[test]
fn tall_page_holds_everything_on_one_page() {
    let content = PlanContent::mininghub();
    let mut layout = LayoutConfig::default();
    layout.page.height = 2000.0;
    let rec = render_plan(RecordingRenderer::new(), &content, None, &layout, &OPTIONS).unwrap();
    assert_eq!(rec.page_count, 1);
    assert!(!rec.ops.contains(&DrawOp::NewPage));
    match rec.find_text("© 2025 MiningHub. All rights reserved.") {
        Some(DrawOp::Text { y, .. }) => assert_eq!(*y, 1985.0),
        other => panic!("footer not found: {:?}", other),
    }
}

// -------------------------------------------------------
// Level grid and team table
// -------------------------------------------------------

#[test]
fn level_grid_wraps_before_right_margin() {
    let mut content = PlanContent::mininghub();
    content.level_income = (1..=12)
        .map(|level| mininghub_core::content::LevelIncome {
            level,
            percentage: 2.0,
        })
        .collect();
    let rec = record(&content, None);

    let boxes: Vec<_> = rec
        .rects()
        .filter(|f| f.width == 30.0 && f.height == 20.0)
        .collect();
    assert_eq!(boxes.len(), 12);
    for frame in &boxes {
        assert!(frame.right() <= 190.0, "{:?}", frame);
    }

    let mut rows: Vec<usize> = Vec::new();
    let mut last_y = None;
    for frame in &boxes {
        if last_y != Some(frame.y) {
            rows.push(0);
            last_y = Some(frame.y);
        }
        if let Some(n) = rows.last_mut() {
            *n += 1;
        }
    }
    assert_eq!(rows, vec![5, 5, 2]);
}

#[test]
fn team_rows_alternate_and_align_values_right() {
    let content = PlanContent::mininghub();
    let rec = record(&content, None);

    let fills: Vec<_> = rec
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Rect {
                frame,
                style: RectStyle::FillStroke { fill, .. },
                ..
            } if frame.height == 10.0 => Some(*fill),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), content.team_rewards.len());
    for pair in fills.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }

    let values: Vec<_> = rec
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, x, align, .. } if text.ends_with("प्रति माह") => Some((*x, *align)),
            _ => None,
        })
        .collect();
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|v| *v == (185.0, TextAlign::Right)));
}

// -------------------------------------------------------
// Failure handling
// -------------------------------------------------------

#[test]
fn missing_images_still_render_every_section() {
    let content = PlanContent::mininghub();
    let rec = record(&content, None);
    assert_eq!(rec.images().count(), 0);
    assert!(rec.position_of(&content.pdf_copy.about_title).is_some());
    assert!(rec.position_of(&content.pdf_copy.income_calculator_title).is_some());
}

#[test]
fn rejected_images_lay_out_like_absent_images() {
    let content = PlanContent::mininghub();
    let images = hero_images();
    let rejected = render_plan(
        RecordingRenderer::failing_images(),
        &content,
        Some(&images),
        &LayoutConfig::default(),
        &OPTIONS,
    )
    .unwrap();
    let absent = record(&content, None);
    assert_eq!(rejected.ops, absent.ops);
    assert_eq!(rejected.page_count, absent.page_count);
}

#[test]
fn unavailable_engine_draws_nothing() {
    let content = PlanContent::mininghub();
    let mut renderer = RecordingRenderer::unavailable();
    let err = paint_plan(
        &mut renderer,
        &content,
        None,
        &LayoutConfig::default(),
        &OPTIONS,
    )
    .unwrap_err();
    assert!(matches!(err, PlanError::EngineUnavailable { .. }));
    assert!(renderer.ops().is_empty());
}

#[test]
fn rendering_is_repeatable() {
    let content = long_content();
    let images = hero_images();
    let first = record(&content, Some(&images));
    let second = record(&content, Some(&images));
    assert_eq!(first.ops, second.ops);
    assert!(first.contains_text("सेवा 120"));
}
