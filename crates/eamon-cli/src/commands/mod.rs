pub mod hall;
pub mod new_player;
pub mod play;
pub mod status;

use colored::Colorize;
use eamon_core::{Player, PlayerId, PlayerStore};
use miette::{IntoDiagnostic, WrapErr};

/// Load a saved player, naming the id in the error.
fn load_player(store: &dyn PlayerStore, id: u32) -> miette::Result<Player> {
    store
        .load_player(PlayerId(id))
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot load player {id}"))
}

fn save_player(store: &dyn PlayerStore, player: &Player) -> miette::Result<()> {
    store
        .save_player(player.id, player)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot save player {}", player.id.0))
}

/// Print the character sheet.
fn print_sheet(player: &Player) {
    println!("{} {}", player.name.bold(), format!("(#{})", player.id.0).dimmed());
    println!(
        "  Hardiness {}  Agility {}  Charisma {}",
        player.hardiness, player.agility, player.charisma
    );
    let spells = &player.spell_abilities;
    println!(
        "  Spells: blast {}  heal {}  power {}  speed {}",
        spells.blast, spells.heal, spells.power, spells.speed
    );
    let weapons = &player.weapon_abilities;
    println!(
        "  Weapons: axe {}  bow {}  club {}  spear {}  sword {}",
        weapons.axe, weapons.bow, weapons.club, weapons.spear, weapons.sword
    );
    println!("  Armor expertise {}", player.armor_expertise);
    println!(
        "  Gold {}  In bank {}",
        player.gold.to_string().yellow(),
        player.gold_in_bank
    );
    if player.inventory.is_empty() {
        println!("  Carrying nothing.");
    } else {
        let names: Vec<&str> = player.inventory.iter().map(|a| a.name.as_str()).collect();
        println!("  Carrying: {}", names.join(", "));
    }
}
