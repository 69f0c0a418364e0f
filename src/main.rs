//! iotdash - a terminal dashboard for an IoT temperature and light controller.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use iotdash::api::ControllerClient;
use iotdash::app::App;
use iotdash::config::{
    log_filter, open_log_file, Config, DEFAULT_API_URL, DEFAULT_MAX_WINDOW, DEFAULT_TIMEOUT_SECS,
};
use iotdash::dashboard::DEFAULT_WINDOW;
use iotdash::ui;
use iotdash::worker::Dispatcher;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "iotdash")]
#[command(about = "A terminal dashboard for an IoT temperature and light controller")]
#[command(long_about = None)]
struct Args {
    /// Base URL of the controller API
    #[arg(long, env = "IOTDASH_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Number of most recent samples to show on start
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    size: usize,

    /// Upper bound of the window control
    #[arg(long, default_value_t = DEFAULT_MAX_WINDOW)]
    max_window: usize,

    /// Re-fetch the graph every SECS seconds (0 disables)
    #[arg(long, value_name = "SECS", default_value_t = 0)]
    refresh: u64,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = open_log_file(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(log_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting iotdash");
    }

    let config = match Config::new(
        &args.api_url,
        args.size,
        args.max_window,
        args.refresh,
        args.timeout,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    };
    config.log_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let client = ControllerClient::new(&config.api_url, config.timeout)?;
    let dispatcher = Dispatcher::new(client, runtime.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = App::new(&config, dispatcher);
    app.start();
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    runtime.shutdown_background();

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("iotdash exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.drain_events();
        app.tick();

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        // Notice mode - must be dismissed before anything else
        if app.dashboard.notice().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                app.dismiss_notice();
            }
            continue;
        }

        // Settings form - handle separately
        if app.dashboard.form.is_visible() {
            match key.code {
                KeyCode::Enter => app.submit_settings(),
                KeyCode::Esc => app.cancel_settings(),
                KeyCode::Tab | KeyCode::Down => app.dashboard.form.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.dashboard.form.prev_field(),
                KeyCode::Backspace => app.dashboard.form.backspace(),
                KeyCode::Char(c) => app.dashboard.form.input(c),
                _ => {},
            }
            continue;
        }

        // Help popup - any key closes it
        if app.show_help {
            app.toggle_help();
            continue;
        }

        // Normal mode
        match key.code {
            // Quit
            KeyCode::Char('q') => return Ok(()),

            // Window control
            KeyCode::Left | KeyCode::Char('h') => app.step_window(-1),
            KeyCode::Right | KeyCode::Char('l') => app.step_window(1),
            KeyCode::PageDown | KeyCode::Char('[') => app.step_window(-10),
            KeyCode::PageUp | KeyCode::Char(']') => app.step_window(10),

            // Requests
            KeyCode::Char('r') => app.refetch(),
            KeyCode::Char('d') => app.refresh_device(),
            KeyCode::Char('e') | KeyCode::Char('s') => app.open_settings(),

            // Features
            KeyCode::Char('T') => app.cycle_theme(),
            KeyCode::Char('?') => app.toggle_help(),

            _ => {},
        }
    }
}
