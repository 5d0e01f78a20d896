use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use readme2md::{Nesting, Overrides, Settings};

/// Rewrite an exported README.md into Markdown, in place.
#[derive(Parser)]
#[command(name = "readme2md", version, about)]
struct Cli {
    /// Directory containing the README
    dir: PathBuf,

    /// Settings file layered over the built-in defaults
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pair nested tags of the same name by depth instead of at the first closing tag
    #[arg(long)]
    balanced: bool,

    /// Print the Markdown instead of overwriting the README
    #[arg(long)]
    stdout: bool,

    /// Log every stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // --verbose forces DEBUG, otherwise RUST_LOG or INFO
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> readme2md::Result<()> {
    let overrides = Overrides {
        config_file: cli.config.clone(),
        nesting: cli.balanced.then_some(Nesting::Balanced),
    };
    let settings = Settings::new(&overrides)?;

    if cli.stdout {
        let path = readme2md::readme_path(&cli.dir, &settings);
        print!("{}", readme2md::convert_from_path(&path, &settings)?);
    } else {
        readme2md::convert_readme(&cli.dir, &settings)?;
        tracing::info!("Done!");
    }
    Ok(())
}
