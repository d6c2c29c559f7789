use clap::{Parser, Subcommand};
use salon_page::simulate::SimulationOptions;
use salon_page::{config, generate, output, simulate};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "salon-page")]
#[command(about = "Static landing page generator for a beauty salon")]
#[command(long_about = "\
Static landing page generator for a beauty salon

Every word, price and timing on the page comes from config.toml. The page is
a single index.html with its CSS and script inlined; sections fade in as they
scroll into view and the stats counters count up once.

Site structure:

  site/
  ├── config.toml          # Overrides of the stock config (optional)
  └── assets/              # Logo, hero slides, images → copied to output

Run 'salon-page gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render index.html and copy assets
    Build,
    /// Validate config.toml without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Run the page's motion headless and print what it does
    Simulate {
        /// Milliseconds between animation frames
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f64,
        /// How long to run the hero rotator, in milliseconds
        #[arg(long, default_value_t = 12_500)]
        rotator_ms: u64,
        /// Frame samples printed per counter
        #[arg(long, default_value_t = output::SAMPLES_SHOWN)]
        samples: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = generate::generate(&site_config, &cli.source, &cli.output)?;
            output::print_build_output(&report, &site_config.site.assets_dir);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            output::print_check_output(&site_config, &cli.source);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Simulate {
            frame_ms,
            rotator_ms,
            samples,
        } => {
            let site_config = config::load_config(&cli.source)?;
            let options = SimulationOptions {
                frame_ms,
                rotator_ms,
                ..SimulationOptions::default()
            };
            let report = simulate::simulate(&site_config, &options)?;
            output::print_simulation(&report, samples);
            if !report.all_settled() {
                return Err("counters did not settle within the frame limit".into());
            }
        }
    }

    Ok(())
}
