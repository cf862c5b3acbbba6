use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::assets::{self, HeroImages};
use crate::backend::{DocumentRenderer, Frame, RectStyle, TextAlign, TextStyle};
use crate::calculator::monthly_income;
use crate::config::AppConfig;
use crate::content::PlanContent;
use crate::error::Result;
use crate::graphics::Color;
use crate::image::RasterImage;
use crate::layout::{needs_page_break, wrap_text, GridCursor, GridSlot, LayoutConfig, RenderCursor};
use crate::pdf::PdfBackend;

const PACKAGE_BOX_HEIGHT: f64 = 30.0;
const CALCULATOR_BOX_HEIGHT: f64 = 35.0;
/// Horizontal offset of bullet glyphs and bullet text from the margin.
const BULLET_X: f64 = 2.0;
const BULLET_TEXT_X: f64 = 7.0;

fn accent() -> Color {
    Color::rgb8(34, 139, 34)
}

fn body() -> Color {
    Color::gray8(60)
}

fn muted() -> Color {
    Color::gray8(100)
}

fn faint() -> Color {
    Color::gray8(150)
}

/// Inputs that would otherwise come from the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Year printed in the copyright footer.
    pub year: i32,
}

impl RenderOptions {
    pub fn current() -> Self {
        RenderOptions {
            year: chrono::Local::now().year(),
        }
    }
}

/// Paint the plan and finish the document.
///
/// A vertical cursor walks the sections in a fixed order. Before each block
/// the layout checks that the block still fits above the bottom margin and
/// otherwise starts a new page at the top margin.
pub fn render_plan<R: DocumentRenderer>(
    mut renderer: R,
    content: &PlanContent,
    images: Option<&HeroImages>,
    layout: &LayoutConfig,
    options: &RenderOptions,
) -> Result<R::Output> {
    paint_plan(&mut renderer, content, images, layout, options)?;
    renderer.finish()
}

/// Paint the plan without finishing. Returns the number of pages used.
///
/// Fails with `EngineUnavailable` before drawing anything if the renderer
/// reports itself unusable.
pub fn paint_plan<R: DocumentRenderer>(
    renderer: &mut R,
    content: &PlanContent,
    images: Option<&HeroImages>,
    layout: &LayoutConfig,
    options: &RenderOptions,
) -> Result<usize> {
    renderer.ensure_available()?;
    info!(with_images = images.is_some(), "rendering plan");

    let mut painter = Painter {
        renderer,
        layout,
        cursor: RenderCursor::new(&layout.page),
    };
    painter.paint(content, images, options)?;

    let pages = painter.cursor.page_index + 1;
    info!(pages, "plan rendered");
    Ok(pages)
}

/// Render the plan to PDF bytes with already-loaded images.
pub fn render_plan_pdf(
    content: &PlanContent,
    images: Option<&HeroImages>,
    config: &AppConfig,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let backend = PdfBackend::new(
        config.layout.page,
        &config.pdf,
        config.assets.font.as_deref(),
    )?;
    render_plan(backend, content, images, &config.layout, options)
}

/// Load the hero images, then render the PDF for the current year. Missing
/// or broken images only drop the images.
pub async fn generate_plan_pdf(content: &PlanContent, config: &AppConfig) -> Result<Vec<u8>> {
    let images = assets::load_hero_images_or_skip(&config.assets).await;
    render_plan_pdf(content, images.as_ref(), config, &RenderOptions::current())
}

struct Painter<'a, R> {
    renderer: &'a mut R,
    layout: &'a LayoutConfig,
    cursor: RenderCursor,
}

impl<R: DocumentRenderer> Painter<'_, R> {
    fn margin(&self) -> f64 {
        self.layout.page.margin
    }

    fn content_width(&self) -> f64 {
        self.layout.page.content_width()
    }

    /// Start a new page if `required` does not fit below the cursor.
    fn reserve(&mut self, required: f64) -> Result<()> {
        if needs_page_break(self.cursor.y, required, &self.layout.page) {
            self.renderer.new_page()?;
            self.cursor.break_page(&self.layout.page);
            debug!(page = self.cursor.page_index, required, "page break");
        }
        Ok(())
    }

    fn text(&mut self, text: &str, x: f64, dy: f64, style: TextStyle) {
        let y = self.cursor.y + dy;
        self.renderer.add_text(text, x, y, &style, TextAlign::Left);
    }

    fn aligned(&mut self, text: &str, x: f64, dy: f64, style: TextStyle, align: TextAlign) {
        let y = self.cursor.y + dy;
        self.renderer.add_text(text, x, y, &style, align);
    }

    fn heading(&mut self, reserve: f64, title: &str, style: TextStyle, advance: f64) -> Result<()> {
        self.reserve(reserve)?;
        self.text(title, self.margin(), 0.0, style);
        self.cursor.advance(advance);
        Ok(())
    }

    /// Word-wrapped paragraph. Each line is checked against the bottom
    /// margin; the cursor ends at least `budget` below the paragraph's top.
    fn paragraph(&mut self, text: &str, style: TextStyle, budget: f64) -> Result<()> {
        let lines = wrap_text(&*self.renderer, text, &style, self.content_width());
        let line_height = style.line_height();
        let mut top = self.cursor.y;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(line_height);
            }
            let page = self.cursor.page_index;
            self.reserve(line_height)?;
            if self.cursor.page_index != page {
                top = self.cursor.y;
            }
            self.text(line, self.margin(), 0.0, style);
        }
        let used = if lines.is_empty() {
            0.0
        } else {
            self.cursor.y - top + line_height + self.layout.paragraph_gap
        };
        self.cursor.y = top + budget.max(used);
        Ok(())
    }

    /// One bullet item; continuation lines wrap under the item text.
    fn bullet(&mut self, text: &str, reserve: f64, advance: f64, max_width: f64) -> Result<()> {
        let style = TextStyle::normal(10.0, body());
        self.reserve(reserve)?;
        let margin = self.margin();
        self.text("•", margin + BULLET_X, 0.0, TextStyle::normal(10.0, accent()));
        let lines = wrap_text(&*self.renderer, text, &style, max_width);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.cursor.advance(style.line_height());
                self.reserve(style.line_height())?;
            }
            self.text(line, margin + BULLET_TEXT_X, 0.0, style);
        }
        self.cursor.advance(advance);
        Ok(())
    }

    fn bullets(&mut self, items: &[String]) -> Result<()> {
        let width = self.content_width() - BULLET_TEXT_X;
        for item in items {
            self.bullet(item, self.layout.bullet_reserve, self.layout.bullet_advance, width)?;
        }
        Ok(())
    }

    fn hero_image(&mut self, image: &RasterImage, name: &str) -> Result<()> {
        let image_layout = self.layout.image;
        self.reserve(image_layout.reserve.max(image_layout.height))?;
        let frame = Frame::new(
            self.margin(),
            self.cursor.y,
            self.content_width(),
            image_layout.height,
        );
        match self.renderer.add_image(image, frame) {
            Ok(()) => self.cursor.advance(image_layout.advance.max(image_layout.height)),
            Err(e) => warn!(image = name, "skipping image: {}", e),
        }
        Ok(())
    }

    fn paint(
        &mut self,
        content: &PlanContent,
        images: Option<&HeroImages>,
        options: &RenderOptions,
    ) -> Result<()> {
        let margin = self.margin();

        self.text(&content.name, margin, 0.0, TextStyle::bold(28.0, accent()));
        self.cursor.advance(10.0);
        self.text(&content.tagline, margin, 0.0, TextStyle::normal(14.0, muted()));
        self.cursor.advance(15.0);

        if let Some(images) = images {
            self.hero_image(&images.crypto_mining, "crypto_mining")?;
        }

        self.about(content)?;

        if let Some(images) = images {
            self.hero_image(&images.blockchain_dev, "blockchain_dev")?;
        }

        self.explainer(content)?;
        self.package(content)?;
        self.referral(content)?;
        self.level_income(content)?;
        self.team_rewards(content)?;
        self.deposit_withdrawal(content)?;
        self.income_calculator(content)?;
        self.footer(content, options);
        Ok(())
    }

    fn about(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        self.heading(self.layout.section_reserve, &copy.about_title, heading, 8.0)?;
        self.paragraph(&content.description, TextStyle::normal(11.0, body()), 20.0)?;

        let list_heading = TextStyle::bold(13.0, Color::BLACK);
        self.heading(self.layout.list_reserve, &copy.services_title, list_heading, 7.0)?;
        self.bullets(&content.services)?;
        self.cursor.advance(5.0);

        self.heading(self.layout.list_reserve, &copy.benefits_title, list_heading, 7.0)?;
        self.bullets(&content.benefits)?;
        self.cursor.advance(10.0);
        Ok(())
    }

    fn explainer(&mut self, content: &PlanContent) -> Result<()> {
        let explainer = &content.crypto_mining_explainer;
        let title = TextStyle::bold(16.0, accent());
        self.heading(self.layout.large_section_reserve, &explainer.title, title, 10.0)?;

        let sub = TextStyle::bold(13.0, Color::BLACK);
        let what_is = &explainer.what_is_mining;
        self.heading(self.layout.section_reserve, &what_is.title, sub, 7.0)?;
        self.paragraph(&what_is.content, TextStyle::normal(10.0, body()), 25.0)?;

        let how = &explainer.how_it_works;
        self.heading(self.layout.block_section_reserve, &how.title, sub, 7.0)?;
        let width = self.content_width() - 10.0;
        for point in &how.points {
            self.bullet(point, self.layout.point_reserve, self.layout.point_advance, width)?;
        }
        self.cursor.advance(10.0);
        Ok(())
    }

    fn package(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        let reserve = self.layout.block_section_reserve.max(10.0 + PACKAGE_BOX_HEIGHT);
        self.heading(reserve, &copy.package_title, heading, 10.0)?;

        let margin = self.margin();
        let frame = Frame::new(margin, self.cursor.y, self.content_width(), PACKAGE_BOX_HEIGHT);
        self.renderer.add_rect(
            frame,
            RectStyle::FillStroke {
                fill: Color::rgb8(240, 248, 255),
                stroke: accent(),
            },
        );

        let package = &content.package;
        let labels = &copy.package_labels;
        let cells = [
            (&labels.single_package, package.amount),
            (&labels.daily_credit, package.daily_credit),
            (&labels.monthly_earning, monthly_income(package.daily_credit)),
        ];
        let cell_width = self.content_width() / cells.len() as f64;
        for (i, (label, value)) in cells.into_iter().enumerate() {
            let x = margin + 5.0 + i as f64 * cell_width;
            self.text(label, x, 8.0, TextStyle::normal(12.0, Color::BLACK));
            self.text(&format!("${}", value), x, 18.0, TextStyle::bold(18.0, accent()));
        }
        self.cursor.advance(PACKAGE_BOX_HEIGHT + 10.0);
        Ok(())
    }

    fn referral(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        self.heading(self.layout.section_reserve, &copy.referral_title, heading, 10.0)?;
        let line = format!("{}{}", copy.referral_text, content.referral.direct_reward);
        self.text(&line, self.margin(), 0.0, TextStyle::normal(11.0, body()));
        self.cursor.advance(15.0);
        Ok(())
    }

    fn level_income(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let heading = TextStyle::bold(14.0, Color::BLACK);
        let grid = self.layout.level_grid;
        let reserve = self.layout.block_section_reserve.max(10.0 + grid.box_height);
        self.heading(reserve, &copy.level_income_title, heading, 10.0)?;

        let mut slots = GridCursor::new(&self.layout.page, grid);
        for level in &content.level_income {
            let x = match slots.next_slot() {
                GridSlot::SameRow(x) => x,
                GridSlot::NewRow(x) => {
                    self.cursor.advance(slots.row_advance());
                    self.reserve(slots.row_advance())?;
                    x
                }
            };
            let frame = Frame::new(x, self.cursor.y, grid.box_width, grid.box_height);
            self.renderer.add_rect(
                frame,
                RectStyle::FillStroke {
                    fill: Color::gray8(245),
                    stroke: Color::gray8(200),
                },
            );
            let center = x + grid.box_width / 2.0;
            let label = format!("{} {}", copy.level_label, level.level);
            self.aligned(&label, center, 7.0, TextStyle::normal(9.0, muted()), TextAlign::Center);
            let percentage = format!("{}%", level.percentage);
            let value = TextStyle::bold(14.0, accent());
            self.aligned(&percentage, center, 15.0, value, TextAlign::Center);
        }
        self.cursor.advance(grid.box_height + 15.0);
        Ok(())
    }

    fn team_rewards(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let labels = &copy.team_rewards_labels;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        self.heading(self.layout.large_section_reserve, &copy.team_rewards_title, heading, 10.0)?;

        let margin = self.margin();
        let row_height = self.layout.team_row_height;
        let row_advance = self.layout.team_row_advance.max(row_height);
        let baseline = row_height * 0.65;
        let value_x = self.layout.page.right_limit() - 5.0;
        for (i, reward) in content.team_rewards.iter().enumerate() {
            self.reserve(row_advance)?;
            let fill = if i % 2 == 0 {
                Color::gray8(250)
            } else {
                Color::gray8(242)
            };
            let frame = Frame::new(margin, self.cursor.y, self.content_width(), row_height);
            self.renderer.add_rect(
                frame,
                RectStyle::FillStroke {
                    fill,
                    stroke: Color::gray8(220),
                },
            );
            let members = format!("{} {}", reward.team_size, labels.members);
            self.text(&members, margin + 5.0, baseline, TextStyle::normal(10.0, body()));
            let amount = format!("${} {}", reward.monthly_reward, labels.per_month);
            let value = TextStyle::bold(10.0, accent());
            self.aligned(&amount, value_x, baseline, value, TextAlign::Right);
            self.cursor.advance(row_advance);
        }
        self.cursor.advance(10.0);
        Ok(())
    }

    fn deposit_withdrawal(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        self.heading(self.layout.section_reserve, &copy.deposit_withdrawal_title, heading, 10.0)?;

        let margin = self.margin();
        let label = TextStyle::bold(12.0, Color::BLACK);
        self.text(&copy.deposit_method_label, margin, 0.0, label);
        self.text(&content.deposit.method, margin + 40.0, 0.0, TextStyle::normal(12.0, body()));
        self.cursor.advance(10.0);

        self.text(&copy.withdrawal_features_label, margin, 0.0, label);
        self.cursor.advance(7.0);
        self.bullets(&content.withdrawal.features)?;
        self.cursor.advance(10.0);
        Ok(())
    }

    fn income_calculator(&mut self, content: &PlanContent) -> Result<()> {
        let copy = &content.pdf_copy;
        let labels = &copy.income_calculator_labels;
        let heading = TextStyle::bold(16.0, Color::BLACK);
        let reserve = self.layout.block_section_reserve.max(10.0 + CALCULATOR_BOX_HEIGHT);
        self.heading(reserve, &copy.income_calculator_title, heading, 10.0)?;

        let margin = self.margin();
        let frame = Frame::new(margin, self.cursor.y, self.content_width(), CALCULATOR_BOX_HEIGHT);
        self.renderer.add_rect(
            frame,
            RectStyle::FillStroke {
                fill: Color::rgb8(255, 250, 240),
                stroke: accent(),
            },
        );
        let package = &content.package;
        let lines = [
            format!("{} ${}", labels.investment, package.amount),
            format!("{} ${}", labels.daily_earning, package.daily_credit),
            format!("{} ${}", labels.monthly_earning, monthly_income(package.daily_credit)),
        ];
        for (i, line) in lines.iter().enumerate() {
            let dy = 8.0 * (i + 1) as f64;
            self.text(line, margin + 5.0, dy, TextStyle::normal(11.0, body()));
        }
        self.cursor.advance(CALCULATOR_BOX_HEIGHT + 5.0);

        self.paragraph(&copy.income_calculator_note, TextStyle::normal(9.0, muted()), 0.0)
    }

    /// Pinned near the bottom edge of the last page, inside the margin band.
    fn footer(&mut self, content: &PlanContent, options: &RenderOptions) {
        let page = self.layout.page;
        let y = page.height - self.layout.footer_offset;
        let style = TextStyle::normal(9.0, faint());
        let copyright = format!("© {} {}. All rights reserved.", options.year, content.name);
        self.renderer
            .add_text(&copyright, page.margin, y, &style, TextAlign::Left);
        self.renderer.add_text(
            &content.pdf_copy.footer_generated,
            page.right_limit(),
            y,
            &style,
            TextAlign::Right,
        );
    }
}
