use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use mininghub_core::download::{save_document, DownloadAction};
use mininghub_core::render::render_plan_pdf;
use mininghub_core::{
    generate_plan_pdf, html, logging, AppConfig, IncomeBreakdown, PlanContent, PlanError,
    RenderOptions,
};

#[derive(Parser, Debug)]
#[command(name = "mininghub", version, about = "MiningHub investment plan page and PDF export")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the plan PDF (the "Download PDF" action)
    Pdf {
        /// Output file, defaults to the configured PDF path
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Skip loading the hero images
        #[arg(long)]
        no_images: bool,
    },
    /// Write the plan page as HTML
    Html {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Write both the HTML page and the PDF
    Build,
    /// Compute a monthly income
    Income {
        #[arg(long)]
        daily: f64,

        #[arg(long, default_value_t = 0.0)]
        team_reward: f64,

        #[arg(long, default_value_t = 0.0)]
        level_income: f64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        match e.downcast_ref::<PlanError>() {
            Some(plan_error) => {
                eprintln!("{}", plan_error.user_message());
                std::process::exit(exit_code(plan_error));
            }
            None => {
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn exit_code(e: &PlanError) -> i32 {
    match e {
        PlanError::Config { .. } | PlanError::Toml(_) => 2,
        PlanError::EngineUnavailable { .. } => 3,
        _ => 1,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!("config: {:?}", config);
    let content = PlanContent::mininghub();

    match cli.command {
        Command::Pdf { out, no_images } => {
            let path = out.unwrap_or_else(|| config.output.pdf_path());
            download_pdf(&content, &config, &path, no_images).await?;
            println!("PDF saved to {}", path.display());
        }
        Command::Html { out } => {
            let path = out.unwrap_or_else(|| config.output.html_path());
            write_html(&content, &config, &path).await?;
            println!("HTML saved to {}", path.display());
        }
        Command::Build => {
            let html_path = config.output.html_path();
            let pdf_path = config.output.pdf_path();
            write_html(&content, &config, &html_path).await?;
            download_pdf(&content, &config, &pdf_path, false).await?;
            println!("HTML saved to {}", html_path.display());
            println!("PDF saved to {}", pdf_path.display());
        }
        Command::Income {
            daily,
            team_reward,
            level_income,
        } => {
            let income = IncomeBreakdown::new(daily)
                .team_reward(team_reward)
                .level_income(level_income);
            println!("monthly income: ${}", income.monthly());
            println!("total monthly income: ${}", income.total());
        }
    }
    Ok(())
}

async fn download_pdf(
    content: &PlanContent,
    config: &AppConfig,
    path: &Path,
    no_images: bool,
) -> anyhow::Result<()> {
    let action = DownloadAction::new();
    let bytes = action
        .run(async {
            if no_images {
                render_plan_pdf(content, None, config, &RenderOptions::current())
            } else {
                generate_plan_pdf(content, config).await
            }
        })
        .await?;
    save_document(&bytes, path).await?;
    Ok(())
}

async fn write_html(content: &PlanContent, config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let page = html::render_plan_page(content, &RenderOptions::current(), &pdf_href(config, path));
    save_document(page.as_bytes(), path)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Link to the PDF relative to the page when both live in the output dir.
fn pdf_href(config: &AppConfig, html_path: &Path) -> String {
    let pdf_path = config.output.pdf_path();
    match (pdf_path.parent(), html_path.parent()) {
        (Some(a), Some(b)) if a == b => config.output.pdf_filename.clone(),
        _ => pdf_path.display().to_string(),
    }
}
