use clap::{Parser, Subcommand};
use matchup::{catalog, check, config, generate, output, render::HtmlRenderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matchup")]
#[command(about = "Static site generator for pairwise software comparisons")]
#[command(long_about = "\
Static site generator for pairwise software comparisons

Every unordered pair of catalog items gets its own \"A vs B\" page, in every
configured language, together with a home page per language, privacy and
terms pages, sitemap.xml and robots.txt.

Output structure:

  dist/
  ├── index.html                   # Default-locale home
  ├── jasper-vs-rytr/index.html    # One directory per pair
  ├── privacy/index.html
  ├── terms/index.html
  ├── es/                          # Every other locale under its code
  │   └── ...
  ├── sitemap.xml                  # Exactly the pages written above
  └── robots.txt

Set RUST_LOG=debug for per-page diagnostics on stderr.

Run 'matchup gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Catalog JSON file (array of item objects)
    #[arg(long, default_value = "catalog.json", global = true)]
    catalog: PathBuf,

    /// Site configuration
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory (cleared on every build)
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean rebuild of the whole site
    Build,
    /// Verify that an existing output tree matches its sitemap
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.config)?;
            init_thread_pool(&site_config.processing);

            println!("==> Loading {}", cli.catalog.display());
            let catalog = catalog::load_catalog(&cli.catalog)?;
            output::print_catalog_summary(&catalog);

            let last_modified = site_config
                .build_date
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let renderer = HtmlRenderer::new(&site_config.theme);

            println!("==> Generating HTML → {}", cli.output.display());
            let report = generate::build_site(
                &catalog.items,
                &site_config,
                &cli.output,
                &renderer,
                last_modified,
            )?;
            output::print_build_report(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", cli.output.display());
            let report = check::verify_output(&cli.output, &site_config.base_url)?;
            output::print_check_report(&report);
            if !report.is_consistent() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so report output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
