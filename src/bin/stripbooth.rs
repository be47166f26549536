use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stripbooth::{
    BoothScreen, CommandShareSheet, DirectoryDownloads, DirectorySource, ExportOutcome,
    FilterTag, FrameSource, IntervalTicker, JsonFileStore, NoShareSheet, Opened, Route,
    SessionStore, ShareSheet, ShotCount, ShotSelector, StripComposer, StripConfig,
    SyntheticSource, TickOutcome,
};

/// Overrides the countdown tick period, in milliseconds.
const TICK_MS_ENV: &str = "STRIPBOOTH_TICK_MS";

#[derive(Parser, Debug)]
#[command(name = "stripbooth", version)]
struct Cli {
    /// Session file (defaults to $STRIPBOOTH_SESSION or .stripbooth/session.json).
    #[arg(long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Choose how many photos to take (1, 3 or 4).
    Select(SelectArgs),
    /// Capture the selected number of photos, bake their filters and store them.
    Capture(CaptureArgs),
    /// Compose the stored photos into a strip and save or share it.
    Compose(ComposeArgs),
    /// List the available filters.
    Filters,
}

#[derive(Parser, Debug)]
struct SelectArgs {
    /// Number of shots.
    #[arg(long)]
    shots: ShotCount,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Directory of still images used as the camera feed.
    #[arg(long, conflicts_with = "synthetic", required_unless_present = "synthetic")]
    source: Option<PathBuf>,

    /// Use a generated test-card feed instead of a directory.
    #[arg(long)]
    synthetic: bool,

    /// Filter per shot, comma separated; the last one repeats.
    #[arg(long, value_delimiter = ',', default_value = "none")]
    filters: Vec<FilterTag>,

    /// Countdown tick period in milliseconds (defaults to $STRIPBOOTH_TICK_MS or 1000).
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Route printed by `select` (e.g. /capture?shots=3); defaults to the stored count.
    #[arg(long)]
    route: Option<Route>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Directory downloads are written to.
    #[arg(long)]
    out_dir: PathBuf,

    /// Strip configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Share instead of saving (uses $STRIPBOOTH_SHARE_CMD, falls back to saving).
    #[arg(long)]
    share: bool,

    /// Export from a minimized view.
    #[arg(long)]
    minimized: bool,

    /// Route the composer is opened with.
    #[arg(long, default_value = "/background?complete=true")]
    route: Route,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = match cli.session {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::from_env(),
    };
    match cli.cmd {
        Command::Select(args) => cmd_select(args, &mut store),
        Command::Capture(args) => cmd_capture(args, &mut store),
        Command::Compose(args) => cmd_compose(args, &store),
        Command::Filters => {
            cmd_filters();
            Ok(())
        }
    }
}

fn cmd_select(args: SelectArgs, store: &mut JsonFileStore) -> anyhow::Result<()> {
    let mut selector = ShotSelector::open(&*store)?;
    selector.choose(args.shots);
    let route = selector.proceed(store)?;
    println!("{route}");
    Ok(())
}

fn tick_period(arg: Option<u64>) -> anyhow::Result<Duration> {
    let ms = match arg {
        Some(ms) => ms,
        None => match std::env::var(TICK_MS_ENV) {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("parse {TICK_MS_ENV}={raw:?}"))?,
            Err(_) => 1000,
        },
    };
    Ok(Duration::from_millis(ms))
}

fn cmd_capture(args: CaptureArgs, store: &mut JsonFileStore) -> anyhow::Result<()> {
    let route = match args.route {
        Some(route) => route,
        None => {
            let shots = match store.load_or_default()?.selected_shots {
                Some(shots) => shots,
                None => {
                    tracing::warn!("no shot count selected, taking a single shot");
                    ShotCount::One
                }
            };
            Route::Capture { shots }
        }
    };

    let mut source: Box<dyn FrameSource> = match args.source {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(SyntheticSource::default()),
    };
    let mut ticker = IntervalTicker::new(tick_period(args.tick_ms)?);

    let mut booth = BoothScreen::open(&route, source.as_mut())?;
    if let Some(reason) = booth.machine().camera_error() {
        anyhow::bail!("camera unavailable: {reason}");
    }

    let target = booth.machine().shots().target().get();
    for i in 0..target {
        let filter = args
            .filters
            .get(i)
            .or(args.filters.last())
            .copied()
            .unwrap_or_default();
        booth.select_filter(filter);
        println!("{}  [{}]", booth.machine().status_line(), filter.label());

        let outcome = booth
            .capture_one_with(&mut ticker, &mut |o| {
                if let TickOutcome::Counting(n) = o {
                    println!("  {n}...");
                }
            })
            .with_context(|| format!("capture shot {} of {target}", i + 1))?;
        match outcome {
            TickOutcome::Captured { index, .. } => println!("  captured shot {}", index + 1),
            TickOutcome::NoFrame => anyhow::bail!("camera produced no frame"),
            other => anyhow::bail!("countdown ended without a capture: {other:?}"),
        }
    }
    println!("{}", booth.machine().status_line());

    let next = booth.finish(store).context("bake and store photos")?;
    println!("{next}");
    Ok(())
}

fn cmd_compose(args: ComposeArgs, store: &JsonFileStore) -> anyhow::Result<()> {
    let mut composer = match StripComposer::open(&args.route, store)? {
        Opened::Ready(c) => c,
        Opened::Redirect(to) => {
            anyhow::bail!("no finished photo strip in the session; start again at {to}")
        }
    };
    if let Some(path) = &args.config {
        composer.set_config(StripConfig::from_json_file(path)?)?;
    }
    if args.minimized {
        composer.toggle_minimized();
    }

    let mut downloads = DirectoryDownloads::new(&args.out_dir);
    let at = stripbooth::export::exporter::now();
    let outcome = if args.share {
        let mut sheet: Box<dyn ShareSheet> =
            match CommandShareSheet::from_env(args.out_dir.join(".share")) {
                Some(cmd) => Box::new(cmd),
                None => Box::new(NoShareSheet),
            };
        composer.share(sheet.as_mut(), &mut downloads, at)
    } else {
        composer.save(&mut downloads, at)
    };

    match outcome {
        ExportOutcome::Saved { file_name } => {
            println!("{}", downloads.dir().join(file_name).display());
            Ok(())
        }
        ExportOutcome::Shared => {
            println!("shared");
            Ok(())
        }
        ExportOutcome::Failed(alert) => anyhow::bail!("{alert}"),
    }
}

fn cmd_filters() {
    for tag in FilterTag::ALL {
        println!("{:<11} {:<11} {}", tag.name(), tag.label(), tag.css_filter());
    }
}
