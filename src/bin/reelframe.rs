use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use reelframe::{
    Canvas, ClientConfig, EditSession, FrameVariantId, HttpReelBackend, LayoutDescription,
    OverlaySet, PollConfig, ReelBackend, ReelEditData, TextOverlay, Zone,
};

#[derive(Parser, Debug)]
#[command(name = "reelframe", version)]
struct Cli {
    /// Backend base URL (overrides REELFRAME_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides REELFRAME_API_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame registry as JSON.
    Frames,
    /// Print the preview layout of a frame as JSON.
    Layout(LayoutArgs),
    /// Estimate how the render service will fit a text into a zone.
    Fit(FitArgs),
    /// Rasterize the preview layout to a PNG.
    Preview(PreviewArgs),
    /// Load a reel, apply edits, save, optionally request a render.
    Edit(EditArgs),
    /// Poll a reel record and print its status on every tick.
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Frame variant id, e.g. DIVIDER_FRAME.
    #[arg(long)]
    frame: String,

    #[arg(long)]
    top: Option<String>,

    #[arg(long)]
    bottom: Option<String>,

    #[arg(long, default_value_t = Canvas::REEL.width)]
    width: u32,

    #[arg(long, default_value_t = Canvas::REEL.height)]
    height: u32,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Print the SHA-256 of the layout JSON instead of the JSON.
    #[arg(long)]
    digest: bool,
}

#[derive(Parser, Debug)]
struct FitArgs {
    #[arg(long)]
    frame: String,

    /// `top` or `bottom`.
    #[arg(long)]
    zone: String,

    #[arg(long)]
    text: String,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EditArgs {
    #[arg(long)]
    reel: u64,

    #[arg(long)]
    frame: Option<String>,

    /// Text for the top zone; replaces an existing top overlay.
    #[arg(long, conflicts_with = "clear_top")]
    top: Option<String>,

    /// Text for the bottom zone; replaces an existing bottom overlay.
    #[arg(long, conflicts_with = "clear_bottom")]
    bottom: Option<String>,

    #[arg(long)]
    clear_top: bool,

    #[arg(long)]
    clear_bottom: bool,

    /// Request a render after saving.
    #[arg(long)]
    render: bool,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    #[arg(long)]
    reel: u64,

    #[arg(long, default_value_t = 5)]
    interval_secs: u64,

    /// Stop after this many ticks (default: run until interrupted).
    #[arg(long)]
    ticks: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reelframe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames => cmd_frames(),
        Command::Layout(args) => cmd_layout(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Edit(args) => {
            let backend = make_backend(cli.api_url, cli.token)?;
            runtime()?.block_on(cmd_edit(backend, args))
        }
        Command::Watch(args) => {
            let backend = make_backend(cli.api_url, cli.token)?;
            runtime()?.block_on(cmd_watch(backend, args))
        }
    }
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start tokio runtime")
}

fn make_backend(api_url: Option<String>, token: Option<String>) -> anyhow::Result<HttpReelBackend> {
    let mut config = ClientConfig::from_env().context("read client config from environment")?;
    if let Some(url) = api_url {
        config = ClientConfig::new(url)?
            .with_timeout(config.timeout)
            .with_token(config.token.unwrap_or_default());
    }
    if let Some(token) = token {
        config = config.with_token(token);
    }
    Ok(HttpReelBackend::new(config)?)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output JSON")?;
    println!("{s}");
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

fn cmd_frames() -> anyhow::Result<()> {
    let entries: Vec<_> = reelframe::list_variants()
        .iter()
        .map(|v| {
            serde_json::json!({
                "id": v.id,
                "name": v.name,
                "description": v.description,
                "geometry": v.id.geometry(),
            })
        })
        .collect();
    print_json(&entries)
}

fn build_layout(args: &SurfaceArgs) -> anyhow::Result<LayoutDescription> {
    let mut overlays = OverlaySet::new();
    if let Some(text) = &args.top {
        overlays.insert(TextOverlay::new(Zone::Top, text.as_str()))?;
    }
    if let Some(text) = &args.bottom {
        overlays.insert(TextOverlay::new(Zone::Bottom, text.as_str()))?;
    }
    let surface = Canvas::new(args.width, args.height)?;
    Ok(reelframe::compose_layout_for_id(&args.frame, &overlays, surface)?)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let layout = build_layout(&args.surface)?;
    if args.digest {
        println!("{}", sha256_hex(&layout.to_canonical_json()?));
        return Ok(());
    }
    print_json(&layout)
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let frame: FrameVariantId = args.frame.parse()?;
    let zone: Zone = args.zone.parse()?;
    reelframe::check_text_len(&args.text)?;
    print_json(&reelframe::calculate_text_for_frame(&args.text, zone, frame))
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let layout = build_layout(&args.surface)?;
    reelframe::save_png(&layout, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn apply_text(session: &mut EditSession, zone: Zone, text: String) -> anyhow::Result<()> {
    if session.state().overlays.is_occupied(zone) {
        session.update_overlay_text(zone, text)?;
    } else {
        session.add_overlay(zone, text)?;
    }
    Ok(())
}

async fn cmd_edit(backend: HttpReelBackend, args: EditArgs) -> anyhow::Result<()> {
    let mut session = EditSession::load(&backend, args.reel)
        .await
        .with_context(|| format!("load reel {}", args.reel))?;

    if let Some(frame) = &args.frame {
        session.select_frame(frame.parse()?);
    }
    if args.clear_top {
        session.remove_overlay(Zone::Top);
    }
    if args.clear_bottom {
        session.remove_overlay(Zone::Bottom);
    }
    if let Some(text) = args.top {
        apply_text(&mut session, Zone::Top, text)?;
    }
    if let Some(text) = args.bottom {
        apply_text(&mut session, Zone::Bottom, text)?;
    }

    if args.render {
        let job = session.render(&backend).await.context("render reel")?;
        eprintln!("render queued: {} ({})", job.job_id, job.message);
    } else if session.is_dirty() {
        session.save(&backend).await.context("save reel")?;
    } else {
        eprintln!("no changes");
    }

    print_json(&serde_json::json!({
        "reel_id": session.reel_id(),
        "state": session.state(),
        "save_status": session.save_status(),
        "render_status": session.render_status(),
    }))
}

fn describe(data: &ReelEditData) -> String {
    format!(
        "{} frame={} overlays={} edited={} uploaded={} updated_at={}",
        data.label(),
        data.frame_type,
        data.text_overlays.as_ref().map_or(0, Vec::len),
        data.is_edited,
        data.is_uploaded,
        data.updated_at
    )
}

async fn cmd_watch(backend: HttpReelBackend, args: WatchArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.interval_secs > 0, "--interval-secs must be > 0");
    let reel_id = args.reel;
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let handle = reelframe::spawn_poll(
        PollConfig::every(Duration::from_secs(args.interval_secs))
            .with_request_timeout(backend.config().timeout),
        move || {
            let backend = backend.clone();
            async move { backend.get_reel(reel_id).await }
        },
        move |outcome| {
            let _ = tx.send(outcome);
        },
    );

    let mut seen = 0u32;
    while let Some(outcome) = rx.recv().await {
        match outcome {
            Ok(data) => println!("{}", describe(&data)),
            Err(err) if err.is_retryable() => eprintln!("poll failed: {err}"),
            Err(err) => {
                handle.shutdown().await?;
                return Err(err).with_context(|| format!("watch reel {reel_id}"));
            }
        }
        seen += 1;
        if args.ticks.is_some_and(|n| seen >= n) {
            break;
        }
    }
    handle.shutdown().await?;
    Ok(())
}
