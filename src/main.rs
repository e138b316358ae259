use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tracing::info;

use inspector::app::App;
use inspector::config::{Config, default_log_path, load_config, load_config_from_path};
use inspector::event::{Event, EventHandler};
use inspector::logging::init_file_logging;
use inspector::system::reader::ProcRoot;
use inspector::{plain, ui};

#[derive(Parser)]
#[command(
    name = "inspector",
    about = "Live procfs dashboard: host info, load, CPU/memory usage and active tasks"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root of the procfs tree to sample
    #[arg(short = 'p', long = "procfs")]
    procfs: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Print text reports to stdout instead of drawing the TUI.
    #[arg(long, default_value_t = false)]
    plain: bool,

    /// Number of reports in plain mode (0 runs until Ctrl-C).
    #[arg(long, default_value_t = 0)]
    count: u64,

    /// Log file (defaults to the cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug` or `inspector=trace`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    let log_path = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(default_log_path);
    init_file_logging(&log_path, &config.general.log_level)?;
    info!(
        procfs = %config.general.procfs_root.display(),
        refresh_ms = config.general.refresh_rate_ms,
        plain = cli.plain,
        "starting"
    );

    if cli.plain {
        let root = ProcRoot::new(&config.general.procfs_root);
        let refresh = refresh_interval(&config);
        return plain::run(root, refresh, cli.count).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();
    info!("exiting");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let tick_rate = refresh_interval(&config);
    let mut app = App::new(config);
    let mut events = EventHandler::new(tick_rate);

    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Tick => app.refresh_data(),
            Event::Resize => {}
        }
        if app.running {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn refresh_interval(config: &Config) -> Duration {
    Duration::from_millis(config.general.refresh_rate_ms.max(1))
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref root) = cli.procfs {
        config.general.procfs_root = root.clone();
    }
    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = Some(path.clone());
    }
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }

    config
}
