//! CLI frontend for the Eamon adventure engine.

mod commands;
mod demo;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eamon_core::{Gender, JsonDirStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "eamon",
    about = "Eamon: text adventures in the Main Hall tradition",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding saved players
    #[arg(long, global = true, default_value = "players")]
    store: PathBuf,

    /// RNG seed for reproducible dice
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll up a new adventurer and save it
    NewPlayer {
        /// The adventurer's name
        name: String,

        /// The adventurer's gender
        #[arg(short, long, value_enum, default_value = "male")]
        gender: GenderArg,
    },

    /// Show a saved adventurer
    Status {
        /// Player id
        id: u32,
    },

    /// Visit the Main Hall
    Hall {
        /// Player id
        id: u32,

        #[command(subcommand)]
        action: HallAction,
    },

    /// Play an adventure, reading commands from stdin
    Play {
        /// Adventure JSON file (default: the bundled demo)
        #[arg(short, long)]
        adventure: Option<PathBuf>,

        /// Player id
        #[arg(short, long)]
        player: u32,

        /// Write the session transcript here when play ends
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum HallAction {
    /// List the shop's stock, or buy an item from it
    Shop {
        /// Item to buy
        item: Option<String>,
    },

    /// Sell a carried item back to the shop
    Sell {
        /// Item to sell
        item: String,
    },

    /// Buy a point of hardiness, agility or charisma from the witch
    Witch {
        /// hardiness, agility or charisma
        attribute: String,
    },

    /// Learn or improve a spell from the wizard
    Wizard {
        /// blast, heal, power or speed
        spell: String,

        /// Pay even when the spell is already mastered
        #[arg(long)]
        force: bool,
    },

    /// Deposit or withdraw gold
    Bank {
        #[command(subcommand)]
        action: BankAction,
    },
}

#[derive(Subcommand)]
enum BankAction {
    /// Put gold in the bank
    Deposit {
        /// Amount of gold
        amount: u32,
    },

    /// Take gold out of the bank
    Withdraw {
        /// Amount of gold
        amount: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn main() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let store = JsonDirStore::new(cli.store);

    match cli.command {
        Commands::NewPlayer { name, gender } => {
            commands::new_player::run(&store, &name, gender.into(), cli.seed)
        }
        Commands::Status { id } => commands::status::run(&store, id),
        Commands::Hall { id, action } => {
            let action = match action {
                HallAction::Shop { item } => commands::hall::Action::Shop(item),
                HallAction::Sell { item } => commands::hall::Action::Sell(item),
                HallAction::Witch { attribute } => commands::hall::Action::Witch(attribute),
                HallAction::Wizard { spell, force } => {
                    commands::hall::Action::Wizard { spell, force }
                }
                HallAction::Bank { action } => match action {
                    BankAction::Deposit { amount } => commands::hall::Action::Deposit(amount),
                    BankAction::Withdraw { amount } => commands::hall::Action::Withdraw(amount),
                },
            };
            commands::hall::run(&store, id, action, cli.seed)
        }
        Commands::Play {
            adventure,
            player,
            transcript,
        } => commands::play::run(
            &store,
            adventure.as_deref(),
            player,
            transcript.as_deref(),
            cli.seed,
        ),
    }
}

/// Log to stderr, filtered by `EAMON_LOG`, then `RUST_LOG`, then `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("EAMON_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
