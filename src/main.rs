use clap::Parser;
use form_learner::cli::commands::{cmd_fill, cmd_learn, cmd_replay, cmd_status, cmd_submit, cmd_suggest};
use form_learner::cli::config::{Cli, Commands, load_config, resolve_settings};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let settings = resolve_settings(&cli, &config);

    match cli.command {
        Commands::Learn { value, field, tag } => {
            cmd_learn(&settings, &field, &tag, &value)?;
        }
        Commands::Submit { tag } => {
            cmd_submit(&settings, &tag)?;
        }
        Commands::Suggest { field, tag } => match cmd_suggest(&settings, &field, &tag) {
            Some(value) => println!("{}", value),
            None => std::process::exit(1),
        },
        Commands::Fill { page, form, output } => {
            cmd_fill(&settings, &page, &form, output.as_deref())?;
        }
        Commands::Replay {
            page,
            events,
            output,
        } => {
            cmd_replay(&settings, &page, &events, output.as_deref(), cli.verbose)?;
        }
        Commands::Status => {
            cmd_status(&settings)?;
        }
    }

    Ok(())
}
