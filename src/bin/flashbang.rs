use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use flashbang::{
    Canvas, Durations, EffectConfig, Ease, FlashbangEffect, Fps, FrameRGBA, HeadlessHost, Rgba8,
    TRIGGER_METHOD,
};

#[derive(Parser, Debug)]
#[command(name = "flashbang", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger the effect and write every frame until it finishes as numbered PNGs.
    Render(RenderArgs),
    /// Trigger the effect and write the frame at one point in time as a PNG.
    Frame(FrameArgs),
    /// Decode an image the way the effect does and print what came out.
    Probe(ProbeArgs),
}

#[derive(Args, Debug)]
struct EffectArgs {
    /// Image to show after the flash (defaults to the configured or home-relative path).
    #[arg(long)]
    image: Option<PathBuf>,

    /// Effect configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Flash hold in milliseconds.
    #[arg(long, default_value_t = Durations::DEFAULT_FLASH_MS)]
    flash_ms: u32,

    /// Image hold in milliseconds.
    #[arg(long, default_value_t = Durations::DEFAULT_IMAGE_SHOW_MS)]
    image_ms: u32,

    /// Fade duration in milliseconds.
    #[arg(long, default_value_t = Durations::DEFAULT_FADE_MS)]
    fade_ms: u32,

    /// Easing for every fade (overrides the config file).
    #[arg(long, value_enum)]
    ease: Option<EaseChoice>,

    /// Scene color under the effect.
    #[arg(long, default_value = "#1a1c24")]
    background: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    effect: EffectArgs,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    effect: EffectArgs,

    /// Time since trigger, in milliseconds.
    #[arg(long)]
    at_ms: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ProbeArgs {
    /// PNG to decode.
    path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    Linear,
    Circle,
}

impl From<EaseChoice> for Ease {
    fn from(c: EaseChoice) -> Self {
        match c {
            EaseChoice::Linear => Ease::Linear,
            EaseChoice::Circle => Ease::Circle,
        }
    }
}

struct Run {
    host: Arc<HeadlessHost>,
    effect: Arc<FlashbangEffect>,
    fps: Fps,
    durations: Durations,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn start(args: &EffectArgs) -> anyhow::Result<Run> {
    let mut config = match &args.config {
        Some(path) => EffectConfig::from_path(path)?,
        None => EffectConfig::from_env(),
    };
    if let Some(image) = &args.image {
        config.image_path = image.clone();
    }
    if let Some(ease) = args.ease {
        config.ease = ease.into();
    }

    let canvas = Canvas::new(args.width, args.height)?;
    let fps = Fps::new(args.fps, 1)?;
    let background = Rgba8::from_hex(&args.background)?;
    let durations = Durations {
        flash_ms: args.flash_ms,
        image_show_ms: args.image_ms,
        fade_ms: args.fade_ms,
    };

    let host = Arc::new(HeadlessHost::new(canvas).with_background(background));
    host.set_durations(&durations);
    let effect = FlashbangEffect::init(host.ports(), config);
    if !effect.is_enabled() {
        anyhow::bail!("effect failed to initialize");
    }

    // Go through the remote method, like an external trigger would.
    host.call_method(TRIGGER_METHOD, serde_json::Value::Null)
        .context("trigger method not registered")?;

    Ok(Run {
        host,
        effect,
        fps,
        durations,
    })
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let run = start(&args.effect)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    // Each phase change lands on the first frame at or after its boundary, so allow some slack.
    let max_frames = run
        .fps
        .frames_covering_ms(run.durations.total_ms(run.effect.has_texture()))
        + 8;

    let mut written = 0u64;
    for idx in 0..max_frames {
        run.host.clock().set(run.fps.frame_to_ms(idx));
        let frame = run.host.render_frame();
        write_png(&args.out.join(format!("frame_{idx:05}.png")), &frame)?;
        written += 1;
        if run.effect.phase().is_idle() {
            break;
        }
    }

    run.effect.shutdown();
    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let run = start(&args.effect)?;

    // Phases only advance on frames, so play every frame leading up to the requested time.
    let mut idx = 0u64;
    while run.fps.frame_to_ms(idx) < args.at_ms {
        run.host.clock().set(run.fps.frame_to_ms(idx));
        run.host.render_frame();
        idx += 1;
    }
    run.host.clock().set(args.at_ms);
    let frame = run.host.render_frame();
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} (phase {:?})",
        args.out.display(),
        run.effect.phase()
    );
    run.effect.shutdown();
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let buf = flashbang::decode_png(&args.path)
        .with_context(|| format!("decode '{}'", args.path.display()))?;
    let translucent = buf
        .rgba8_premul
        .chunks_exact(4)
        .filter(|px| px[3] != 255)
        .count();
    let summary = serde_json::json!({
        "path": args.path.display().to_string(),
        "width": buf.width,
        "height": buf.height,
        "has_alpha": buf.has_alpha,
        "translucent_pixels": translucent,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
