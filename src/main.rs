use clap::Parser;
use screen_locator::cli::commands::{cmd_inspect, cmd_parse, cmd_resolve};
use screen_locator::cli::config::{Cli, Commands, load_config, resolve_format};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Resolve {
            tree,
            types,
            purpose,
            format,
            trace,
            locators,
        } => {
            let format = resolve_format(format.as_deref(), &config);
            let all_found = cmd_resolve(
                &tree,
                &locators,
                &types,
                purpose.as_deref(),
                &format,
                trace.as_deref(),
                &config,
                cli.verbose,
            )?;
            if !all_found {
                std::process::exit(1);
            }
        }
        Commands::Parse { format, locators } => {
            let format = resolve_format(format.as_deref(), &config);
            if !cmd_parse(&locators, &format)? {
                std::process::exit(1);
            }
        }
        Commands::Inspect { tree, format } => {
            let format = resolve_format(format.as_deref(), &config);
            cmd_inspect(&tree, &format)?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from `warn`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}
