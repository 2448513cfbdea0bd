use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use eamon_core::{AdventureData, JsonDirStore};
use eamon_fiction::{Adventure, PlainAdventure, Session, SessionConfig};
use miette::{IntoDiagnostic, WrapErr};
use tracing::info;

use super::{load_player, save_player};
use crate::demo::{DEMO_ADVENTURE, DemoAdventure};

const QUIT: [&str; 2] = ["quit", "q"];

pub fn run(
    store: &JsonDirStore,
    adventure: Option<&Path>,
    player_id: u32,
    transcript: Option<&Path>,
    seed: Option<u64>,
) -> miette::Result<()> {
    let player = load_player(store, player_id)?;
    if player.is_dead() {
        miette::bail!("{} is dead and cannot go adventuring", player.name);
    }

    let (data, script): (AdventureData, &dyn Adventure) = match adventure {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("cannot read {}", path.display()))?;
            let data = AdventureData::from_json(&text)
                .into_diagnostic()
                .wrap_err_with(|| format!("invalid adventure {}", path.display()))?;
            (data, &PlainAdventure as &dyn Adventure)
        }
        None => {
            let data = AdventureData::from_json(DEMO_ADVENTURE).into_diagnostic()?;
            (data, &DemoAdventure as &dyn Adventure)
        }
    };

    let config = SessionConfig {
        seed,
        ..SessionConfig::default()
    };
    let mut session = Session::bootstrap(data, script, player, config).into_diagnostic()?;

    let opening = session.opening().into_diagnostic()?;
    let (title, rest) = opening.split_once('\n').unwrap_or((opening.as_str(), ""));
    println!("{}", title.bold());
    println!("{rest}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.into_diagnostic()?;
        let input = line.trim();
        if QUIT.contains(&input.to_lowercase().as_str()) {
            break;
        }
        let result = session.submit(input);
        if !result.text.is_empty() {
            println!("{}", format!("> {input}").dimmed());
            println!("{}", result.text);
            stdout.flush().into_diagnostic()?;
        }
        if session.is_over() {
            println!("{}", "Your adventure is over.".red().bold());
            break;
        }
    }

    let player = session.player_snapshot();
    save_player(store, &player)?;
    info!(
        session = %session.id(),
        turns = session.turn(),
        gold = player.gold,
        "adventure ended"
    );

    if let Some(path) = transcript {
        let history = session.history();
        let text = if path.extension().is_some_and(|ext| ext == "json") {
            history.to_json().into_diagnostic()?
        } else {
            history.export_text()
        };
        std::fs::write(path, text)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot write transcript {}", path.display()))?;
    }

    println!();
    println!(
        "{} returns to the Main Hall carrying {} item(s).",
        player.name.bold(),
        player.inventory.len()
    );
    Ok(())
}
