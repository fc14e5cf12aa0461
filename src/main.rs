use serial_loopback::cli::{self, CliOutcome, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_OK, EXIT_USAGE};
use serial_loopback::config::ConfigLoader;
use serial_loopback::{interrupt, logging, repl, LoopOutcome, Session};
use std::io;
use std::process::ExitCode;
use tracing::{error, warn};

fn main() -> ExitCode {
    let mut args: Vec<_> = std::env::args_os().collect();
    if args.is_empty() {
        args.push("serial_loopback".into());
    }
    let program = args[0].to_string_lossy().into_owned();

    let requested_port = match cli::parse_args(args) {
        CliOutcome::Parsed(port) => port,
        outcome => {
            match &outcome {
                CliOutcome::UnknownFlag(message) => eprintln!("{message}"),
                _ => print!("{}", cli::usage(&program)),
            }
            return ExitCode::from(outcome.exit_status().unwrap_or(EXIT_USAGE));
        }
    };

    // A broken config file must not change the CLI contract; fall back to defaults.
    let (config, config_error) = match ConfigLoader::load() {
        Ok(loader) => (loader.into_config(), None),
        Err(e) => (ConfigLoader::with_defaults().into_config(), Some(e)),
    };
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Warning: logging disabled: {e}");
    }
    if let Some(e) = config_error {
        warn!("failed to load config, using defaults: {e}");
    }

    if let Err(e) = interrupt::install(|| {
        println!("\nTerminated by user");
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    }) {
        warn!("Ctrl+C handler unavailable: {e}");
    }

    let port_name = config.serial.resolve_port(&requested_port);
    let mut session = match Session::open(&port_name) {
        Ok(session) => session,
        Err(e) => {
            error!(port = %port_name, "failed to open serial port: {e}");
            eprintln!("Error: {e}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    // Stdout stays unlocked: the interrupt watcher prints from its own thread
    // while this one is parked in a read.
    match repl::run(&mut session, io::stdin().lock(), io::stdout()) {
        Ok(LoopOutcome::Bye) => ExitCode::from(EXIT_OK),
        Ok(LoopOutcome::InputClosed) => ExitCode::from(EXIT_FAILURE),
        Err(e) => {
            error!(port = %port_name, "session ended: {e}");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
