use clap::Parser;
use garlic::cli::commands::{cmd_keys, cmd_replay, cmd_store};
use garlic::cli::config::{Cli, Commands, load_config, resolve_store_dir, resolve_trace_path};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    let store_dir = resolve_store_dir(&cli, &config);
    let trace_path = resolve_trace_path(&cli, &config);

    match &cli.command {
        Commands::Keys { document, selector } => {
            cmd_keys(document, selector.as_deref(), &config.options, cli.verbose)?;
        }
        Commands::Replay { document, script } => {
            let passed = cmd_replay(
                document,
                script,
                store_dir,
                &config.options,
                trace_path,
                cli.verbose,
            )?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Store { origin, action } => {
            let origin = origin
                .as_deref()
                .or(config.store.origin.as_deref())
                .ok_or("no origin given (use --origin or store.origin in garlic.yaml)")?;
            cmd_store(origin, action, store_dir, cli.verbose)?;
        }
    }

    Ok(())
}
