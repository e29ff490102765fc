use serde::Deserialize;

use pinfall_core::game_trait::GameMetadata;

/// How the final scoreboard is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Replay configuration, loaded from `pinfall.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PinfallConfig {
    /// Player names in bowling order.
    pub players: Vec<String>,
    /// Rolls to replay before printing the scoreboard.
    pub rolls: Vec<i32>,
    pub output: OutputFormat,
}

impl Default for PinfallConfig {
    fn default() -> Self {
        Self {
            players: vec!["Player 1".to_string()],
            rolls: Vec::new(),
            output: OutputFormat::Text,
        }
    }
}

impl PinfallConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    ///
    /// An explicit path wins over `PINFALL_CONFIG`, which wins over
    /// `config/pinfall.toml`.
    pub fn load(path: Option<&str>) -> Self {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("PINFALL_CONFIG").ok())
            .unwrap_or_else(|| "config/pinfall.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<PinfallConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    PinfallConfig::default()
                },
            },
            Err(_) => PinfallConfig::default(),
        }
    }

    /// Fold command-line overrides into the file config.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(players) = &args.players {
            self.players.clone_from(players);
        }
        if !args.rolls.is_empty() {
            self.rolls.clone_from(&args.rolls);
        }
        if args.json {
            self.output = OutputFormat::Json;
        }
    }

    /// Validate configuration against the game it will drive, logging
    /// problems. Returns false if the replay cannot start.
    pub fn validate(&self, game: &GameMetadata) -> bool {
        if self.players.len() < usize::from(game.min_players) {
            tracing::error!(
                players = self.players.len(),
                min_players = game.min_players,
                "{} needs more players",
                game.name
            );
            return false;
        }
        if self.players.iter().any(|p| p.trim().is_empty()) {
            tracing::warn!("Some player names are blank");
        }
        // Two balls per frame plus one bonus ball in the last.
        let max_rolls = self.players.len() * (2 * usize::from(game.frame_count) + 1);
        if self.rolls.len() > max_rolls {
            tracing::warn!(
                rolls = self.rolls.len(),
                max_rolls,
                "More rolls than a game can take, the rest will be ignored"
            );
        }
        true
    }
}

/// Command-line flags: `--config=PATH`, `--players=A,B`, `--json`, then rolls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<String>,
    pub players: Option<Vec<String>>,
    pub json: bool,
    pub rolls: Vec<i32>,
}

impl CliArgs {
    /// Parse arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(path) = arg.strip_prefix("--config=") {
                parsed.config = Some(path.to_string());
            } else if let Some(names) = arg.strip_prefix("--players=") {
                parsed.players = Some(
                    names
                        .split(',')
                        .map(|n| n.trim().to_string())
                        .filter(|n| !n.is_empty())
                        .collect(),
                );
            } else if arg == "--json" {
                parsed.json = true;
            } else {
                let pins = arg
                    .parse::<i32>()
                    .map_err(|_| format!("not a pin count or flag: {arg}"))?;
                parsed.rolls.push(pins);
            }
        }
        Ok(parsed)
    }
}
