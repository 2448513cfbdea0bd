use colored::Colorize;
use eamon_core::JsonDirStore;

use super::{load_player, print_sheet};

pub fn run(store: &JsonDirStore, id: u32) -> miette::Result<()> {
    let player = load_player(store, id)?;
    print_sheet(&player);
    if player.is_dead() {
        println!("  {}", "Dead.".red().bold());
    } else if player.damage > 0 {
        println!("  Health {}/{}", player.health(), player.hardiness);
    }
    Ok(())
}
