use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "reelcraft", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the video config and scene table.
    Info(SourceArgs),
    /// Evaluate a single frame and write it as pretty JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one JSON frame per line.
    Frames(FramesArgs),
    /// Write the composition JSON.
    Export(ExportArgs),
    /// Validate a composition JSON file.
    Validate(ValidateArgs),
    /// Print the SHA-256 of the per-frame fingerprints of a range.
    Fingerprint(RangeArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input composition JSON (defaults to the built-in promo).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive, defaults to the composition duration).
    #[arg(long)]
    end: Option<u64>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Output NDJSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Composition JSON to validate.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Export(args) => cmd_export(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
    }
}

fn read_comp_json(path: &Path) -> anyhow::Result<reelcraft::Composition> {
    let f = File::open(path).with_context(|| format!("open composition '{}'", path.display()))?;
    let r = BufReader::new(f);
    let comp: reelcraft::Composition =
        serde_json::from_reader(r).with_context(|| "parse composition JSON")?;
    Ok(comp)
}

fn load_comp(source: &SourceArgs) -> anyhow::Result<reelcraft::Composition> {
    let comp = match &source.in_path {
        Some(path) => read_comp_json(path)?,
        None => reelcraft::promo()?,
    };
    comp.validate()?;
    Ok(comp)
}

fn resolve_range(
    comp: &reelcraft::Composition,
    args: &RangeArgs,
) -> anyhow::Result<reelcraft::FrameRange> {
    let total = comp.duration_frames()?;
    let end = args.end.unwrap_or(total);
    if end > total {
        anyhow::bail!("--end {end} is past the composition duration ({total} frames)");
    }
    Ok(reelcraft::FrameRange::new(
        reelcraft::FrameIndex(args.start),
        reelcraft::FrameIndex(end),
    )?)
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn std::io::Write>> {
    let Some(path) = out else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(f)))
}

fn cmd_info(args: SourceArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args)?;
    let config = comp.video_config()?;
    let timing = comp.timing()?;

    println!(
        "fps:      {}/{} ({:.3})",
        config.fps.num,
        config.fps.den,
        config.fps.as_f64()
    );
    println!("canvas:   {}x{}", config.canvas.width, config.canvas.height);
    println!(
        "duration: {} frames ({:.2}s)",
        config.duration_in_frames,
        config.fps.frames_to_secs(config.duration_in_frames)
    );
    println!();
    println!("{:<24} {:>8} {:>8} {:>8}", "scene", "start", "end", "frames");
    for (scene, range) in comp.scenes.iter().zip(timing.ranges()) {
        println!(
            "{:<24} {:>8} {:>8} {:>8}",
            scene.id,
            range.start.0,
            range.end.0,
            range.len_frames()
        );
    }
    for (i, t) in comp.transitions.iter().enumerate() {
        println!(
            "transition {i}: {} ({} frames) '{}' -> '{}'",
            t.kind,
            t.duration_frames,
            comp.scenes[i].id,
            comp.scenes[i + 1].id
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.source)?;
    let frame = reelcraft::Evaluator::eval_frame(&comp, reelcraft::FrameIndex(args.frame))?;

    let mut w = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut w, &frame).with_context(|| "serialize frame JSON")?;
    writeln!(w)?;
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.range.source)?;
    let range = resolve_range(&comp, &args.range)?;

    let frames = reelcraft::Evaluator::eval_range(&comp, range)?;
    let mut w = open_output(args.out.as_deref())?;
    for frame in &frames {
        serde_json::to_writer(&mut w, frame)
            .with_context(|| format!("serialize frame {}", frame.clock.frame.0))?;
        writeln!(w)?;
    }
    w.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {} ({} frames)", out.display(), range.len_frames());
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.source)?;
    let json = comp.to_json_pretty()?;

    let mut w = open_output(Some(args.out.as_path()))?;
    w.write_all(json.as_bytes())?;
    writeln!(w)?;
    w.flush()?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let comp = read_comp_json(&args.in_path)?;
    comp.validate().with_context(|| format!("validate '{}'", args.in_path.display()))?;
    println!(
        "ok: {} scenes, {} frames",
        comp.scenes.len(),
        comp.duration_frames()?
    );
    Ok(())
}

fn cmd_fingerprint(args: RangeArgs) -> anyhow::Result<()> {
    let comp = load_comp(&args.source)?;
    let range = resolve_range(&comp, &args)?;

    let frames = reelcraft::Evaluator::eval_range(&comp, range)?;
    let mut bytes = Vec::with_capacity(frames.len() * 16);
    for frame in &frames {
        bytes.extend_from_slice(&reelcraft::fingerprint_frame(frame).to_bytes());
    }

    println!("{}", sha256_hex(&bytes));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
