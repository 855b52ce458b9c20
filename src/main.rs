use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use blockgrid_catalog::Catalog;
use blockgrid_weights::Palette;

mod assets;
mod config;
mod interactive;
mod render;
mod session;
#[cfg(feature = "window")]
mod texture_cache;
mod tiles;
mod watch;

use config::{SessionConfig, parse_group_spec};
use render::terminal::{TermStyle, write_grid, write_groups};
use session::Session;
use watch::SessionReloader;

#[derive(Parser, Debug)]
#[command(name = "blockgrid", about = "Random grids of weighted block textures")]
struct Cli {
    /// Texture directory or blocks.toml manifest (env: BLOCKGRID_ASSETS)
    #[arg(long, global = true)]
    assets: Option<PathBuf>,
    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw one grid and exit (or redraw on session file changes with --watch)
    Render {
        #[command(flatten)]
        session: SessionArgs,
        /// Emit the render grid as JSON
        #[arg(long)]
        json: bool,
        /// Redraw whenever the session file changes
        #[arg(long, requires = "session")]
        watch: bool,
    },
    /// List catalog blocks matching a query
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Edit groups and reroll from a prompt
    Interactive {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Textured grid in a window; R rerolls (needs the `window` feature)
    Window {
        #[command(flatten)]
        session: SessionArgs,
        #[arg(long, requires = "session")]
        watch: bool,
    },
}

#[derive(Args, Debug, Default)]
struct SessionArgs {
    /// TOML session file (width, height, seed, [[groups]])
    #[arg(long)]
    session: Option<PathBuf>,
    /// Grid width; invalid input becomes 1
    #[arg(long)]
    width: Option<String>,
    /// Grid height; invalid input becomes 1
    #[arg(long)]
    height: Option<String>,
    /// Block group as `a,b[:chance]`; repeatable, replaces the session's groups
    #[arg(long = "group", value_name = "SPEC")]
    groups: Vec<String>,
    /// Seed for reproducible grids
    #[arg(long)]
    seed: Option<u64>,
    /// Number of re-randoms to apply before drawing
    #[arg(long, default_value_t = 0)]
    rolls: u64,
    /// Disable ANSI colors
    #[arg(long)]
    plain: bool,
}

impl SessionArgs {
    fn build(&self) -> Result<Session, Box<dyn Error>> {
        let mut cfg = match &self.session {
            Some(path) => {
                let cfg = SessionConfig::load(path)?;
                log::info!("session loaded from {}", path.display());
                cfg
            }
            None => SessionConfig::default(),
        };
        if self.seed.is_some() {
            // An explicit --seed beats the file's seed.
            cfg.seed = self.seed;
        }
        let mut s = Session::from_config(cfg, rand::random::<u64>());
        self.apply(&mut s);
        for _ in 0..self.rolls {
            s.roll();
        }
        log::debug!(target: "session", "seed {}", s.seed());
        Ok(s)
    }

    /// Command-line overrides on top of whatever the file set.
    fn apply(&self, s: &mut Session) {
        if let Some(w) = &self.width {
            s.set_width_text(w);
        }
        if let Some(h) = &self.height {
            s.set_height_text(h);
        }
        if !self.groups.is_empty() {
            s.set_groups(self.groups.iter().map(|g| parse_group_spec(g)).collect());
        }
    }

    fn style(&self) -> TermStyle {
        TermStyle {
            color: !self.plain && io::stdout().is_terminal(),
            ..TermStyle::default()
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            simplelog::WriteLogger::init(
                simplelog::LevelFilter::Debug,
                simplelog::Config::default(),
                file,
            )?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .format_timestamp(None)
                .init();
        }
    }
    Ok(())
}

fn load_catalog(cli: Option<PathBuf>) -> Result<Catalog, Box<dyn Error>> {
    let source = assets::resolve_catalog_source(cli);
    if !source.exists() {
        log::warn!(
            "no block catalog at {}; every block draws as a fallback color",
            source.display()
        );
        return Ok(Catalog::new());
    }
    Catalog::load(&source)
}

fn run_render(
    args: &SessionArgs,
    catalog: &Catalog,
    palette: &Palette,
    json: bool,
    watch: bool,
) -> Result<(), Box<dyn Error>> {
    let mut session = args.build()?;
    let style = args.style();
    let stdout = io::stdout();
    let draw = |session: &Session| -> Result<(), Box<dyn Error>> {
        let grid = tiles::render_session(session, catalog, palette);
        let mut out = stdout.lock();
        if json {
            render::write_json(&mut out, &grid)?;
        } else {
            write_grid(&mut out, &grid, style)?;
            write_groups(&mut out, session)?;
        }
        out.flush()?;
        Ok(())
    };
    draw(&session)?;
    if !watch {
        return Ok(());
    }
    let Some(path) = args.session.clone() else {
        return Ok(());
    };
    let reloader = SessionReloader::new(path);
    loop {
        match reloader.wait(&mut session, Duration::from_secs(1)) {
            Some(true) => {
                args.apply(&mut session);
                draw(&session)?;
            }
            Some(false) => {}
            None => return Ok(()),
        }
    }
}

#[cfg(feature = "window")]
fn run_window(
    args: &SessionArgs,
    catalog: &Catalog,
    palette: &Palette,
    watch: bool,
) -> Result<(), Box<dyn Error>> {
    let mut session = args.build()?;
    let reloader = match (&args.session, watch) {
        (Some(path), true) => Some(SessionReloader::new(path.clone())),
        _ => None,
    };
    render::window::run(&mut session, catalog, palette, reloader.as_ref());
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(
    _args: &SessionArgs,
    _catalog: &Catalog,
    _palette: &Palette,
    _watch: bool,
) -> Result<(), Box<dyn Error>> {
    Err("blockgrid was built without the `window` feature".into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let catalog = load_catalog(cli.assets.clone())?;
    // Rotated once per process; every tile of the run shares it.
    let palette = Palette::startup(&mut rand::thread_rng());

    match cli.command {
        Some(Command::Render {
            session,
            json,
            watch,
        }) => run_render(&session, &catalog, &palette, json, watch)?,
        Some(Command::Search { query }) => {
            let mut out = io::stdout().lock();
            for id in catalog.search(&query) {
                writeln!(out, "{}", id)?;
            }
        }
        Some(Command::Interactive { session }) => {
            let s = session.build()?;
            let mut repl = interactive::Interactive::new(s, &catalog, &palette, session.style());
            repl.run(io::stdin().lock(), &mut io::stdout().lock())?;
        }
        Some(Command::Window { session, watch }) => run_window(&session, &catalog, &palette, watch)?,
        None => run_render(&SessionArgs::default(), &catalog, &palette, false, false)?,
    }
    Ok(())
}
