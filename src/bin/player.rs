use std::io;
use std::time::Duration;

use clap::{Arg, Command};
use log::error;

use gametree::driver;
use gametree::othello::Othello;
use gametree::search::MctsSetting;
use gametree::selector::{MoveSelector, Strategy};

pub fn main() {
    let matches = Command::new("Othello player")
        .version("0.1")
        .about("Plays Othello against a game manager over stdin/stdout")
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .env("STRATEGY")
                .help("Search engine used to pick moves")
                .num_args(1)
                .value_parser(["minimax", "mcts"])
                .default_value("mcts"),
        )
        .arg(
            Arg::new("rollouts")
                .short('r')
                .long("rollouts")
                .env("ROLLOUTS")
                .help("Number of MCTS rollouts per move")
                .num_args(1)
                .default_value("100")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("explorationWeight")
                .long("exploration-weight")
                .env("EXPLORATION_WEIGHT")
                .help("Weight of the exploration term in the UCT score")
                .num_args(1)
                .default_value("5")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .env("SEED")
                .help("Seed for the MCTS rollouts. Without it, every game plays differently")
                .num_args(1)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("maxNodes")
                .long("max-nodes")
                .env("MAX_NODES")
                .help("Stop an MCTS search early once the tree holds this many nodes")
                .num_args(1)
                .value_parser(clap::value_parser!(u32).range(2..)),
        )
        .arg(
            Arg::new("maxTimeMs")
                .long("max-time-ms")
                .env("MAX_TIME_MS")
                .help("Stop an MCTS search early after this many milliseconds")
                .num_args(1)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("logfile")
                .short('l')
                .long("logfile")
                .env("LOGFILE")
                .value_name("player.log")
                .help("Name of debug logfile")
                .num_args(1),
        )
        .get_matches();

    if let Err(err) = setup_logger(matches.get_one::<String>("logfile")) {
        eprintln!("Failed to set up logging: {}", err);
    }

    let strategy = match matches.get_one::<String>("strategy").map(String::as_str) {
        Some("minimax") => Strategy::Minimax,
        _ => {
            let mut settings = MctsSetting::default()
                .add_rollouts(*matches.get_one::<u64>("rollouts").unwrap())
                .add_exploration_weight(*matches.get_one::<f64>("explorationWeight").unwrap());
            if let Some(seed) = matches.get_one::<u64>("seed") {
                settings = settings.add_seed(*seed);
            }
            if let Some(max_nodes) = matches.get_one::<u32>("maxNodes") {
                settings = settings.add_max_nodes(*max_nodes);
            }
            if let Some(max_time_ms) = matches.get_one::<u64>("maxTimeMs") {
                settings = settings.add_max_time(Duration::from_millis(*max_time_ms));
            }
            Strategy::Mcts(settings)
        }
    };

    let mut selector = match MoveSelector::new(Othello, strategy) {
        Ok(selector) => selector,
        Err(err) => {
            error!("{}", err);
            eprintln!("{}", err);
            std::process::exit(2)
        }
    };

    let stdin = io::stdin();
    if let Err(err) = driver::run(&mut selector, stdin.lock(), io::stdout()) {
        error!("Fatal error: {}", err);
        std::process::exit(1)
    }
}

fn setup_logger(log_file: Option<&String>) -> Result<(), fern::InitError> {
    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    // Stdout carries the protocol, so log output only ever goes to stderr or a file
    if let Some(log_file) = log_file {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Warn)
                    .chain(io::stderr()),
            )
            .apply()?;
    } else {
        log_dispatcher
            .level(log::LevelFilter::Warn)
            .chain(io::stderr())
            .apply()?;
    }
    Ok(())
}
