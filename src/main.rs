//! apod-lens — NASA's Astronomy Picture of the Day, fetched through a
//! fallback chain of proxies and API keys.
//!
//! ## Architecture overview
//!
//! ```text
//!                 ┌──────────┐ Acquisition ┌──────────┐  draw()  ┌──────────┐
//!  show ────────► │ load.rs  │ ──────────► │  app.rs  │ ───────► │  ui.rs   │
//!                 │ (task)   │  (oneshot)  │ (state)  │          │ (render) │
//!                 └──────────┘             └──────────┘          └──────────┘
//!                      │                        ▲
//!                      ▼                        │ handle_key_event()
//!                 ┌──────────┐             ┌──────────┐
//!  render ──────► │ chain.rs │ ──────────► │widget.rs │ ──► HTML fragment
//!                 └──────────┘             └──────────┘
//!
//!  proxy ───────► server.rs (axum, holds the server-side key)
//! ```
//!
//! * **`source/`** — the `ApodSource` trait, the proxy and key-based
//!   sources, and the shared `ApodRecord`.
//! * **`chain`** — tries sources in order; first success wins.
//! * **`render`** / **`widget`** — escaped HTML for a record, or the
//!   placeholder when the chain is exhausted.
//! * **`load`**, **`app`**, **`ui`**, **`input`** — the terminal view.
//! * **`server`** — the proxy endpoints the chain tries first.
//! * **`config`** / **`page`** — arguments, environment and the page's
//!   meta-tag key.

mod app;
mod chain;
mod config;
mod error;
mod input;
mod load;
mod page;
mod render;
mod server;
mod source;
mod ui;
mod widget;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use chain::{Acquisition, Chain};
use config::{Cli, ClientArgs, ClientConfig, Command};
use server::ProxyState;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Initialise tracing once for the whole process.
///
/// `RUST_LOG` wins over `level`.  While the terminal view owns the screen,
/// logs go to `log_file` or nowhere.
fn init_tracing(level: &str, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("apod_lens={level}")))
        .context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if interactive => builder.with_writer(io::sink).init(),
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn build_chain(args: &ClientArgs) -> Result<Chain> {
    let config = ClientConfig::resolve(args)?;
    info!(
        origin = %args.origin,
        client_key = config.client_key.is_some(),
        meta_key = config.meta_key.is_some(),
        "client configuration resolved"
    );
    let chain = Chain::from_config(&config).context("failed to build HTTP client")?;
    info!(tiers = ?chain.kinds(), "acquisition chain ready");
    Ok(chain)
}

/// Print or write the HTML fragment.  Always writes something: the record
/// or the placeholder.
async fn run_render(args: &ClientArgs, output: Option<PathBuf>) -> Result<()> {
    let chain = build_chain(args)?;
    let markup = widget::paint(&chain.acquire().await);

    match output {
        Some(path) => std::fs::write(&path, markup)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{markup}"),
    }
    Ok(())
}

/// Show the terminal view until the user quits.
fn run_show(args: &ClientArgs) -> Result<()> {
    install_panic_hook();

    let chain = build_chain(args)?;
    let mut pending = Some(load::spawn(chain));

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Check whether the chain has finished.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. Take the chain outcome, once
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(outcome) => {
                    app.apply(outcome);
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    app.apply(Acquisition::Exhausted { cause: None });
                    pending = None;
                }
            }
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    // `guard` is dropped here, restoring the terminal.
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, Command::Show(_));
    init_tracing(&cli.log_level, cli.log_file.as_deref(), interactive)?;

    match cli.command {
        Command::Show(args) => tokio::task::block_in_place(|| run_show(&args)),
        Command::Render { client, output } => run_render(&client, output).await,
        Command::Proxy(args) => {
            let state = ProxyState::from_args(&args)?;
            server::serve(args.listen, state).await
        }
    }
}
