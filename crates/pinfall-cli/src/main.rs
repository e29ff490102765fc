use tracing_subscriber::EnvFilter;

use pinfall_cli::config::{CliArgs, PinfallConfig};
use pinfall_tenpin::TenPinGame;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: pinfall [--config=PATH] [--players=A,B,...] [--json] [PINS...]");
            std::process::exit(2);
        },
    };

    let mut config = PinfallConfig::load(args.config.as_deref());
    config.apply_args(&args);
    if !config.validate(&TenPinGame::game_metadata()) {
        std::process::exit(1);
    }

    tracing::info!(
        players = config.players.len(),
        rolls = config.rolls.len(),
        "Pinfall replay starting"
    );

    let replayed = pinfall_cli::run(&config);
    print!("{}", replayed.output);
    if let Err(e) = replayed.outcome {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
