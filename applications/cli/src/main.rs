/// ReMusic CLI - interactive playback shell over an in-memory catalog
use clap::Parser;
use remusic_cli::{config::CliConfig, Fixture, Reply, Shell};
use remusic_core::UserId;
use remusic_playback::MemoryStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "remusic-cli")]
#[command(about = "Browse a ReMusic catalog and drive playback from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./remusic.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog fixture, overriding `catalog.fixture` from the config
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Log in as this user on start
    #[arg(short, long, env = "REMUSIC_USER")]
    user: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.fixture.is_some() {
        config.catalog.fixture = cli.fixture;
    }
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store = match &config.catalog.fixture {
        Some(path) => Fixture::load(path)?.into_store(&config.playback)?,
        None => {
            tracing::warn!("No catalog fixture configured, starting with an empty store");
            MemoryStore::from_config(&config.playback)
        }
    };

    let mut shell = Shell::new(store, &config.playback)?;
    if let Some(user) = cli.user {
        shell = shell.with_user(UserId::new(user));
    }

    run(&mut shell)
}

fn run(shell: &mut Shell) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout, shell)?;
    for line in stdin.lock().lines() {
        match shell.execute(&line?) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => writeln!(stdout, "{}", text)?,
            Err(e) => writeln!(stdout, "Error: {}", e)?,
        }
        prompt(&mut stdout, shell)?;
    }
    Ok(())
}

fn prompt(stdout: &mut io::Stdout, shell: &Shell) -> io::Result<()> {
    match shell.user() {
        Some(user) => write!(stdout, "{}> ", user)?,
        None => write!(stdout, "remusic> ")?,
    }
    stdout.flush()
}
