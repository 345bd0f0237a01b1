use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use termcade::constants::EVENT_POLL_MS;
use termcade::rng;
use termcade::ui::ui;
use termcade::{App, GameKind, Settings};

/// What to start with: the game list, or a game by name.
#[derive(Debug, Clone, Copy)]
enum Launch {
    List,
    Game(GameKind),
}

impl FromStr for Launch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("list") {
            Ok(Launch::List)
        } else {
            s.parse().map(Launch::Game)
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "termcade", version, about = "Tetris, Snake, Pong, 2048 and Jeweled in your terminal")]
struct Cli {
    /// Game to start directly (tetris, snake, pong, puzzle, jeweled), or `list`
    game: Option<Launch>,

    /// Seed for every random choice, to replay a session
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (defaults to ./termcade.json when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn init_logging(settings: &Settings) -> Result<()> {
    // Nothing is logged unless asked for; stderr is unusable while drawing.
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(&settings.log_file)
        .with_context(|| format!("Failed to create log file {}", settings.log_file.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn setup_terminal() -> Result<(Tui, bool)> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    enter_screen().map_err(|err| {
        // Leave the shell usable when setup stops halfway.
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        err
    })
}

fn enter_screen() -> Result<(Tui, bool)> {
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter the alternate screen")?;

    // Key release events let Pong paddles stop exactly when a key is let go
    let keyboard_enhancement_active = matches!(
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        ),
        Ok(())
    );

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, keyboard_enhancement_active))
}

/// Every step runs even if an earlier one failed; the first failure is returned.
fn restore_terminal(terminal: &mut Tui, keyboard_enhancement_active: bool) -> Result<()> {
    let mut steps = Vec::new();
    if keyboard_enhancement_active {
        steps.push((
            "pop keyboard flags",
            execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags),
        ));
    }
    steps.push((
        "disable mouse capture",
        execute!(terminal.backend_mut(), DisableMouseCapture),
    ));
    steps.push(("disable raw mode", terminal::disable_raw_mode()));
    steps.push((
        "leave alternate screen",
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
    ));
    steps.push(("show cursor", terminal.show_cursor()));
    first_failure(steps)
}

fn first_failure(steps: Vec<(&str, io::Result<()>)>) -> Result<()> {
    let mut first = None;
    for (step, result) in steps {
        if let Err(err) = result {
            log::error!("terminal restore: {step} failed: {err}");
            if first.is_none() {
                first = Some(anyhow::Error::new(err).context(format!("Failed to {step}")));
            }
        }
    }
    first.map_or(Ok(()), Err)
}

fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| {
            app.frame_area = f.size();
            ui(f, app);
        })?;

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => app.on_key(key, now),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        app.update(Instant::now());
    }
    Ok(())
}

fn print_games() {
    for kind in GameKind::ALL {
        println!("{:<8} {}", kind.name(), kind.description());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let launch = match cli.game {
        Some(Launch::List) => {
            print_games();
            return Ok(());
        }
        Some(Launch::Game(kind)) => Some(kind),
        None => None,
    };

    let settings = Settings::resolve(cli.config.as_deref())?;
    init_logging(&settings)?;
    log::debug!("settings: {settings:?}");

    let seed = cli.seed.or(settings.seed).unwrap_or_else(rng::clock_seed);
    log::info!("starting with seed {seed}");

    let (mut terminal, keyboard_enhancement_active) = setup_terminal()?;

    let now = Instant::now();
    let mut app = App::new(settings, seed, now);
    app.input_state.keyboard_enhancement_active = keyboard_enhancement_active;
    if let Some(kind) = launch {
        app.launch(kind, now);
    }

    let result = run(&mut terminal, &mut app);
    app.unmount();

    let restored = restore_terminal(&mut terminal, keyboard_enhancement_active);
    result.and(restored)
}
