use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use ghost_templates::{
    ExtractedSilhouetteModel, FontBook, ParametricSilhouetteModel, PngDirSink, SilhouetteProvider,
    TemplateCompositor, TemplateConfig,
};

#[derive(Parser, Debug)]
#[command(name = "ghost-templates", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render templates from the built-in sedan geometry.
    Render(RenderArgs),
    /// Render templates traced from a transparent-background vehicle bitmap.
    Extract(ExtractArgs),
    /// Print normalized anchor positions without rendering.
    Anchors(AnchorsArgs),
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// JSON config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Render templates in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Preferred font file for captions.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Only render these templates (side_driver, front_left_45, rear_center).
    #[arg(long, num_args = 1..)]
    only: Vec<String>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Source bitmap with a transparent background.
    #[arg(long)]
    source: PathBuf,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Parser, Debug)]
struct AnchorsArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Print JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Extract(args) => cmd_extract(args),
        Command::Anchors(args) => cmd_anchors(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.run)?;
    render(cfg, Arc::new(ParametricSilhouetteModel::new()))
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.run)?;
    let model = ExtractedSilhouetteModel::from_path(&args.source)
        .with_context(|| format!("trace source '{}'", args.source.display()))?;
    render(cfg, Arc::new(model))
}

fn cmd_anchors(args: AnchorsArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.run)?;
    let compositor = TemplateCompositor::new(
        cfg,
        Arc::new(ParametricSilhouetteModel::new()),
        FontBook::empty(),
    )?;
    let report = compositor.anchor_report()?;
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn render(cfg: TemplateConfig, provider: Arc<dyn SilhouetteProvider>) -> anyhow::Result<()> {
    let fonts = FontBook::discover(cfg.font_path.as_deref());
    let mut sink = PngDirSink::new(&cfg.output_dir);
    let compositor = TemplateCompositor::new(cfg, provider, fonts)?;

    let summary = compositor.render_all(&mut sink)?;
    for path in sink.written() {
        eprintln!("wrote {}", path.display());
    }
    print!("{}", summary.report.to_text());

    if !summary.is_success() {
        for e in &summary.failures {
            eprintln!("error: {e}");
        }
        anyhow::bail!(
            "{} of {} templates failed",
            summary.failures.len(),
            summary.failures.len() + summary.persisted.len()
        );
    }
    Ok(())
}

fn load_config(args: &RunArgs) -> anyhow::Result<TemplateConfig> {
    let mut cfg = match &args.config {
        Some(path) => TemplateConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => TemplateConfig::default(),
    };
    if let Some(out) = &args.out {
        cfg.output_dir = out.clone();
    }
    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    if let Some(font) = &args.font {
        cfg.font_path = Some(font.clone());
    }
    if !args.only.is_empty() {
        cfg.only = args.only.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}
