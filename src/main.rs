use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use postview::export::export_page;
use postview::logging::{self, LogTarget};
use postview::settings::{Overrides, Settings};
use postview::{events, ui, App, Fetcher, HttpApi, PostApi};

#[derive(Parser, Debug)]
#[command(name = "postview")]
#[command(about = "Browse, search and page through blog posts and their comments")]
struct Args {
    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root URL of the posts API
    #[arg(short, long)]
    base_url: Option<String>,

    /// Posts shown per page
    #[arg(short = 'n', long)]
    per_page: Option<usize>,

    /// Log file for interactive mode
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one page as JSON and exit instead of starting the TUI
    #[arg(short, long)]
    dump: bool,

    /// Initial search term
    #[arg(short, long)]
    search: Option<String>,

    /// Page to print with --dump (1-based)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    page: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        base_url: args.base_url.clone(),
        posts_per_page: args.per_page,
        log_file: args.log_file.clone(),
    };
    let settings = Settings::load(args.config.as_deref(), &overrides)?;

    let target = if args.dump {
        LogTarget::Stderr
    } else {
        LogTarget::File(settings.log_path())
    };
    logging::init(&settings.log_level, target)?;

    let mut builder = HttpApi::builder().base_url(settings.base_url.clone());
    if let Some(timeout) = settings.request_timeout() {
        builder = builder.timeout(timeout);
    }
    let api = Arc::new(builder.build().context("Failed to build HTTP client")?);

    let rt = tokio::runtime::Runtime::new()?;

    if args.dump {
        let page = usize::try_from(args.page).context("--page is too large")?;
        return rt.block_on(dump_page(
            api.as_ref(),
            args.search.as_deref().unwrap_or(""),
            page,
            settings.posts_per_page,
        ));
    }

    info!(source = api.description(), "starting TUI");
    let fetcher = Fetcher::new(api, rt.handle().clone());
    run_tui(fetcher, &settings, args.search)
}

/// Fetch posts once and print the requested page as JSON.
///
/// A failed fetch prints an empty page.
async fn dump_page(api: &dyn PostApi, search: &str, page: usize, per_page: usize) -> Result<()> {
    let export = export_page(api, search, page, per_page).await;
    println!("{}", export.to_json()?);
    Ok(())
}

/// Run the TUI until the user quits
fn run_tui(fetcher: Fetcher, settings: &Settings, search: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(fetcher, settings.posts_per_page);
    if let Some(term) = search {
        app.set_search(term);
    }

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        app.poll_fetches();
    }

    Ok(())
}
