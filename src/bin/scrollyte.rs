use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollyte::{Evaluator, Page, Sample, Viewport, fingerprint_frame, presets};

#[derive(Parser, Debug)]
#[command(name = "scrollyte", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one scroll sample and print the resolved frame as JSON.
    Frame(FrameArgs),
    /// Sweep the scroll range and report per-step frame fingerprints.
    Scrub(ScrubArgs),
    /// Validate a page document.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct PageSource {
    /// Input page JSON; defaults to the built-in showcase page.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Seed for the built-in showcase page.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: PageSource,

    /// Scroll offset in logical pixels.
    #[arg(long)]
    scroll: f64,

    /// Viewport size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1440x900")]
    viewport: String,

    /// Clock time in seconds for time-driven loops.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    source: PageSource,

    /// Number of scroll steps across the page.
    #[arg(long, default_value_t = 120)]
    steps: usize,

    /// Viewport size as WIDTHxHEIGHT.
    #[arg(long, default_value = "1440x900")]
    viewport: String,

    /// Also scrub back down and verify the frames retrace exactly.
    #[arg(long)]
    check: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Scrub(args) => cmd_scrub(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_page_json(path: &Path) -> anyhow::Result<Page> {
    let f = File::open(path).with_context(|| format!("open page '{}'", path.display()))?;
    let r = BufReader::new(f);
    let page: Page = serde_json::from_reader(r).with_context(|| "parse page JSON")?;
    Ok(page)
}

fn load_page(source: &PageSource) -> anyhow::Result<Page> {
    let page = match &source.in_path {
        Some(path) => read_page_json(path)?,
        None => presets::page(source.seed)?,
    };
    page.validate()?;
    Ok(page)
}

fn parse_viewport(s: &str) -> anyhow::Result<Viewport> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("viewport '{s}' is not WIDTHxHEIGHT"))?;
    let w: f64 = w.trim().parse().with_context(|| "parse viewport width")?;
    let h: f64 = h.trim().parse().with_context(|| "parse viewport height")?;
    Ok(Viewport::new(w, h)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let page = load_page(&args.source)?;
    let viewport = parse_viewport(&args.viewport)?;

    let frame = Evaluator::eval_at(&page, &Sample::new(args.scroll, viewport, args.time))?;
    let json = serde_json::to_string_pretty(&frame)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json)
                .with_context(|| format!("write frame '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "steps must be > 0");

    let page = load_page(&args.source)?;
    let viewport = parse_viewport(&args.viewport)?;
    let max_scroll = (page.total_height(viewport) - viewport.height).max(0.0);

    let scroll_at = |i: usize| max_scroll * i as f64 / args.steps as f64;

    let mut up = Vec::with_capacity(args.steps + 1);
    for i in 0..=args.steps {
        let scroll = scroll_at(i);
        let frame = Evaluator::eval_at(&page, &Sample::new(scroll, viewport, 0.0))?;
        let fp = fingerprint_frame(&frame);
        println!("step {i:4}  scroll {scroll:10.1}  fp {:016x}{:016x}", fp.hi, fp.lo);
        up.push(fp);
    }

    if args.check {
        for i in (0..=args.steps).rev() {
            let frame = Evaluator::eval_at(&page, &Sample::new(scroll_at(i), viewport, 0.0))?;
            let fp = fingerprint_frame(&frame);
            anyhow::ensure!(
                fp == up[i],
                "scrub down diverged at step {i}: frames do not retrace"
            );
        }
        eprintln!("scrub check passed: {} steps retrace exactly", args.steps + 1);
    }

    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    page.validate()?;
    eprintln!(
        "ok: {} sections, {} actors",
        page.sections.len(),
        page.sections.iter().map(|s| s.actors.len()).sum::<usize>()
    );
    Ok(())
}
