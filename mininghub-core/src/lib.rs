pub mod assets;
pub mod backend;
pub mod calculator;
pub mod config;
pub mod content;
pub mod download;
pub mod error;
pub mod graphics;
pub mod html;
pub mod image;
pub mod layout;
pub mod logging;
pub mod pdf;
pub mod recording;
pub mod render;

pub use backend::{DocumentRenderer, Frame, RectStyle, TextAlign, TextStyle};
pub use calculator::{monthly_income, total_monthly_income, IncomeBreakdown};
pub use config::AppConfig;
pub use content::PlanContent;
pub use error::{PlanError, Result};
pub use pdf::PdfBackend;
pub use render::{generate_plan_pdf, render_plan, render_plan_pdf, RenderOptions};
