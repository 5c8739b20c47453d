use acctvault::cli::{Cli, Commands};
use clap::Parser;

/// Environment variable holding the tracing filter (e.g. `acctvault=debug`).
const LOG_ENV: &str = "ACCTVAULT_LOG";

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref site,
            ref username,
            ref notes,
            ref password,
        } => acctvault::cli::commands::add::execute(
            &cli,
            site,
            username,
            notes.as_deref(),
            password.as_deref(),
        ),
        Commands::List { reveal, json } => {
            acctvault::cli::commands::list::execute(&cli, reveal, json)
        }
        Commands::Search {
            ref keyword,
            reveal,
            json,
        } => acctvault::cli::commands::search::execute(&cli, keyword, reveal, json),
        Commands::Show { id, reveal } => acctvault::cli::commands::show::execute(&cli, id, reveal),
        Commands::Update {
            id,
            ref site,
            ref username,
            ref notes,
            password,
        } => acctvault::cli::commands::update::execute(
            &cli,
            id,
            site.as_deref(),
            username.as_deref(),
            notes.as_deref(),
            password,
        ),
        Commands::Delete { id, force } => acctvault::cli::commands::delete::execute(&cli, id, force),
        Commands::Migrate {
            ref source,
            no_backup,
        } => acctvault::cli::commands::migrate::execute(&cli, source.as_deref(), no_backup),
        Commands::Menu => acctvault::cli::commands::menu::execute(&cli),
        Commands::Completions { shell } => acctvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        acctvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `ACCTVAULT_LOG` (default: warnings only).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
