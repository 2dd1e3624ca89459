use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use randr_toggle::controller::DisplayRotationController;
use randr_toggle::devices::gnome_randr::{GnomeRandr, DEFAULT_PROGRAM};
use randr_toggle::devices::{DisplayTool, DryRun};
use randr_toggle::error::Result;
use randr_toggle::logging::init_logging;

struct Config {
    tool: String,
    dry_run: bool,
    verbose: bool,
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        // Global args are propagated down into the subcommand's matches.
        let matches = matches.subcommand().map(|(_, sub)| sub).unwrap_or(matches);
        Config {
            tool: matches
                .get_one::<String>("tool")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PROGRAM.to_owned()),
            dry_run: matches.get_one::<bool>("dry-run").copied().unwrap_or(false),
            verbose: matches.get_one::<bool>("verbose").copied().unwrap_or(false),
        }
    }
}

fn cli() -> Command<'static> {
    Command::new("randr-toggle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Toggle the built-in display between normal and right rotation")
        .arg(
            Arg::new("tool")
                .long("tool")
                .value_name("PROGRAM")
                .takes_value(true)
                .value_parser(value_parser!(String))
                .default_value(DEFAULT_PROGRAM)
                .global(true)
                .help("Display configuration tool to run"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Query the display but only log the rotate command"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log debug output, including the raw query output"),
        )
        .subcommand(Command::new("toggle").about("Flip the built-in display rotation (default)"))
        .subcommand(
            Command::new("status")
                .about("Print the parsed display state")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the state as JSON"),
                ),
        )
}

async fn run<T: DisplayTool>(tool: T, matches: &ArgMatches) -> Result<()> {
    let controller = DisplayRotationController::new(tool);

    match matches.subcommand() {
        Some(("status", sub)) => {
            let state = controller.query_state().await?;
            if sub.get_one::<bool>("json").copied().unwrap_or(false) {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("rotation: {}", state.raw_rotation);
                println!("is-builtin: {}", state.is_internal_display);
                println!("connector: {}", state.connector_name);
            }
        }
        _ => {
            let outcome = controller.toggle().await;
            tracing::debug!("activation finished: {:?}", outcome);
        }
    }

    Ok(())
}

#[async_std::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();
    let config = Config::from_matches(&matches);

    if let Err(e) = init_logging(config.verbose) {
        eprintln!("{}", e);
    }

    let tool = GnomeRandr::new(config.tool);
    let result = if config.dry_run {
        run(DryRun::new(tool), &matches).await
    } else {
        run(tool, &matches).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
