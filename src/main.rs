//! # Lootforge Command Line Entry Point
//!
//! Loads the catalogs, generates drops for characters, and manages the saved
//! roster and loot history.

use clap::{Args as ClapArgs, Parser, Subcommand};
use lootforge::{
    generation::utils::create_rng, validate_level, BaseItemCatalog, Character, CharacterRoster,
    GeneratedItem, GenerationConfig, LootError, LootGenerator, LootHistory, LootResult,
    ModifierCatalog,
};
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::{error, info};
#[cfg(feature = "dev-tools")]
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Lootforge.
#[derive(Parser, Debug)]
#[command(name = "lootforge")]
#[command(about = "Generate level-gated loot for tabletop characters")]
#[command(version)]
struct Args {
    /// Base item catalog (`class|item_name` per line)
    #[arg(long, global = true, default_value = lootforge::config::DEFAULT_BASE_ITEMS_PATH)]
    base_items: PathBuf,

    /// Replacement modifier table (JSON); the built-in table is used otherwise
    #[arg(long, global = true)]
    modifiers: Option<PathBuf>,

    /// Generation config (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Loot history file
    #[arg(long, global = true, default_value = lootforge::config::DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    /// Character roster file
    #[arg(long, global = true, default_value = lootforge::config::DEFAULT_CHARACTERS_PATH)]
    characters: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate loot for a character
    Generate {
        /// Character name
        #[arg(short, long)]
        name: String,

        /// Character class
        #[arg(short, long)]
        class: String,

        /// Character level (1-20)
        #[arg(short, long, value_parser = parse_level)]
        level: i32,

        #[command(flatten)]
        drop: DropArgs,
    },

    /// Manage saved characters
    #[command(subcommand)]
    Character(CharacterCommand),

    /// Show recent loot history
    History {
        /// Number of records to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// List modifiers, optionally only those eligible at a level
    Modifiers {
        #[arg(short, long)]
        level: Option<i32>,
    },

    /// List classes with base items
    Classes,
}

#[derive(Subcommand, Debug)]
enum CharacterCommand {
    /// Save a character, or update the level of an existing one
    Save {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        class: String,

        #[arg(short, long, value_parser = parse_level)]
        level: i32,
    },

    /// List saved characters
    List,

    /// Generate loot for a saved character
    Loot {
        #[arg(short, long)]
        name: String,

        /// Disambiguates characters sharing a name
        #[arg(short, long)]
        class: Option<String>,

        #[command(flatten)]
        drop: DropArgs,
    },
}

/// Options shared by every command that rolls loot.
#[derive(ClapArgs, Debug)]
struct DropArgs {
    /// Number of drops to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Random seed for reproducible drops (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Do not append the drops to the loot history
    #[arg(long)]
    no_history: bool,

    /// Print drops as JSON
    #[arg(long)]
    json: bool,
}

fn parse_level(value: &str) -> Result<i32, String> {
    let level: i32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    validate_level(level).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Lootforge v{}", lootforge::VERSION);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .parse_default_env()
            .format_timestamp(None)
            .init();
    }
}

fn run(args: Args) -> LootResult<()> {
    match &args.command {
        Command::Generate {
            name,
            class,
            level,
            drop,
        } => {
            let character = Character::new(name, class, *level)?;
            roll_drops(&args, &character, drop)
        }
        Command::Character(command) => run_character_command(&args, command),
        Command::History { limit } => show_history(&args, *limit),
        Command::Modifiers { level } => list_modifiers(&args, *level),
        Command::Classes => list_classes(&args),
    }
}

fn run_character_command(args: &Args, command: &CharacterCommand) -> LootResult<()> {
    match command {
        CharacterCommand::Save { name, class, level } => {
            let character = Character::new(name, class, *level)?;
            let mut roster = CharacterRoster::load(&args.characters)?;
            let updated = roster.upsert(character.clone());
            roster.save(&args.characters)?;
            if updated {
                println!("Updated {}", character);
            } else {
                println!("Saved {}", character);
            }
            Ok(())
        }
        CharacterCommand::List => {
            let roster = CharacterRoster::load(&args.characters)?;
            if roster.is_empty() {
                println!("No saved characters.");
            }
            for character in roster.iter() {
                println!("{}", character);
            }
            Ok(())
        }
        CharacterCommand::Loot { name, class, drop } => {
            let roster = CharacterRoster::load(&args.characters)?;
            let character = roster.find(name, class.as_deref()).cloned().ok_or_else(|| {
                LootError::InvalidCharacter(format!("no saved character named '{}'", name))
            })?;
            roll_drops(args, &character, drop)
        }
    }
}

fn load_generator(args: &Args) -> LootResult<LootGenerator> {
    let modifiers = match &args.modifiers {
        Some(path) => ModifierCatalog::load(path)?,
        None => ModifierCatalog::builtin()?,
    };
    let base_items = BaseItemCatalog::load(&args.base_items)?;
    let config = match &args.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    Ok(LootGenerator::with_config(modifiers, base_items, config))
}

fn roll_drops(args: &Args, character: &Character, drop: &DropArgs) -> LootResult<()> {
    let generator = load_generator(args)?;
    let mut config = generator.config().clone();
    if drop.seed.is_some() {
        config.seed = drop.seed;
    }
    let mut rng = create_rng(&config);
    let history = LootHistory::new(&args.history);

    let items: Vec<GeneratedItem> = (0..drop.count)
        .map(|_| generator.generate_for(character, &mut rng))
        .collect();

    if !drop.no_history {
        for item in &items {
            history.append(character, item)?;
        }
    }

    if drop.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("Character: {}", character.name);
        println!("Level: {}", character.level);
        println!("{}", item);
    }
    if !drop.no_history {
        println!("\nSaved to {}", history.path().display());
    }
    Ok(())
}

fn show_history(args: &Args, limit: usize) -> LootResult<()> {
    let records = LootHistory::new(&args.history).recent(limit)?;
    if records.is_empty() {
        println!("No loot recorded yet.");
    }
    for record in records {
        println!(
            "{:<16} {:<10} L{:<3} {:<40} power {}",
            record.character_name, record.char_class, record.level, record.full_name, record.power_score
        );
    }
    Ok(())
}

fn list_modifiers(args: &Args, level: Option<i32>) -> LootResult<()> {
    let generator = load_generator(args)?;
    let catalog = generator.modifier_catalog();

    let modifiers: Vec<_> = match level {
        Some(level) => catalog.eligible(level).collect(),
        None => catalog.iter().collect(),
    };
    for m in modifiers {
        println!(
            "L{:<3} {:>4.0}%  {:<8} {:<22} {}",
            m.min_level,
            m.chance * 100.0,
            format!("{:?}", m.position).to_lowercase(),
            m.name,
            m.power_text
        );
    }
    Ok(())
}

fn list_classes(args: &Args) -> LootResult<()> {
    let catalog = BaseItemCatalog::load(&args.base_items)?;
    if catalog.class_count() == 0 {
        println!("No classes found in {}", args.base_items.display());
    }
    for class in catalog.classes() {
        println!("{}: {}", class, catalog.candidates(class).join(", "));
    }
    Ok(())
}
