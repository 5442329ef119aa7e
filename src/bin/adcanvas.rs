use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::{Digest, Sha256};

#[derive(Parser, Debug)]
#[command(name = "adcanvas", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a composition document as a PNG.
    Frame(FrameArgs),
    /// Print how body copy wraps at a given width.
    Wrap(WrapArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file; overrides the document's `font`.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print the SHA-256 of the rendered RGBA bytes.
    #[arg(long, default_value_t = false)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct WrapArgs {
    /// Text to wrap.
    #[arg(long)]
    text: String,

    /// Maximum line width in pixels.
    #[arg(long)]
    max_width: f64,

    /// Font file used for measurement.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(long, default_value_t = adcanvas::BODY_FONT_PX)]
    size: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Wrap(args) => cmd_wrap(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = adcanvas::CompositionDoc::from_path(&args.in_path)?;
    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));

    let font = match args.font {
        Some(path) => Some(path),
        None => doc.font_path(root)?,
    };
    let text = adcanvas::TextLayoutEngine::resolve(font.as_deref())?;
    if text.face().is_none() {
        tracing::warn!(
            "no font configured (--font, document `font` or {}); text will not be drawn",
            adcanvas::FONT_ENV
        );
    }

    let state = doc.to_state(root)?;
    let mut renderer = adcanvas::AdRenderer::new(text);
    let frame = renderer.render(&state)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    if args.digest {
        let digest = Sha256::digest(&frame.data);
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        println!("{hex}");
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_wrap(args: WrapArgs) -> anyhow::Result<()> {
    if !args.size.is_finite() || args.size <= 0.0 {
        anyhow::bail!("--size must be finite and > 0");
    }
    let mut text = adcanvas::TextLayoutEngine::resolve(args.font.as_deref())?;
    let params = adcanvas::WrapParams {
        origin: adcanvas::Point::ZERO,
        max_width: args.max_width,
        line_advance: adcanvas::BODY_LINE_ADVANCE,
        size_px: args.size,
    };
    for line in adcanvas::wrap_text(&args.text, params, &mut text) {
        println!("{}\t{:.1}", line.text, line.width);
    }
    Ok(())
}
