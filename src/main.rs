use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use eyre::Result;
use roster::console::{self, Console};
use roster::{
    Admin, Config, HttpSeedSource, JsonlSeedSource, Notifier, Panel, RecordKind, SeedSource, StatusFilter, Student,
    Teacher,
};
use std::io;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster CLI - Browse and edit student and teacher lists")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/roster/roster.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed from a local JSONL file instead of the remote source
    #[arg(long, conflicts_with = "url")]
    seed_file: Option<PathBuf>,

    /// Override the seed URL from the config
    #[arg(long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed one list and print a page of it
    List {
        #[arg(value_enum)]
        kind: Kind,

        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long, value_enum, default_value = "any")]
        status: StatusFilter,

        /// Exact group (students) or level (teachers)
        #[arg(short = 'g', long, default_value = "")]
        category: String,

        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Seed both lists and read commands from stdin
    Console,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Students,
    Teachers,
}

/// Prints notifications to stdout
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("{}", message.green());
    }

    fn error(&self, message: &str) {
        println!("{}", message.red());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.seed_url = url.clone();
    }

    // Setup tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let source: Box<dyn SeedSource> = match &cli.seed_file {
        Some(path) => Box::new(JsonlSeedSource::new(path)),
        None => Box::new(HttpSeedSource::new(&config.seed_url)?),
    };
    let notifier = ConsoleNotifier;

    match cli.command {
        Commands::List {
            kind,
            query,
            status,
            category,
            page,
        } => {
            let view = View {
                query,
                status,
                category,
                page,
            };
            match kind {
                Kind::Students => list::<Student>(&config, source.as_ref(), &notifier, view)?,
                Kind::Teachers => list::<Teacher>(&config, source.as_ref(), &notifier, view)?,
            }
        }
        Commands::Console => {
            let mut admin = Admin::new(&config);
            // a failed kind stays empty and the console still starts
            let (students, teachers) = admin.seed_all(source.as_ref(), &notifier);
            for (collection, result) in [("students", students), ("teachers", teachers)] {
                if let Err(e) = result {
                    warn!(collection, error = ?e, "Starting console without seeded records");
                }
            }

            let stdin = io::stdin();
            let mut stdout = io::stdout();
            Console::new(admin, &notifier).run(stdin.lock(), &mut stdout)?;
        }
    }

    Ok(())
}

struct View {
    query: String,
    status: StatusFilter,
    category: String,
    page: usize,
}

fn list<K: RecordKind>(config: &Config, source: &dyn SeedSource, notifier: &dyn Notifier, view: View) -> Result<()> {
    let mut panel: Panel<K> = Panel::new(config.id_strategy, config.page_size);
    panel.seed(source, notifier)?;

    panel.set_query(view.query);
    panel.set_status_filter(view.status);
    panel.set_category_filter(view.category);
    panel.set_page(view.page);

    console::render_page(&panel.current_page(), &mut io::stdout())
}
