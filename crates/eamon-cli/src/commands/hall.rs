use colored::Colorize;
use eamon_core::{ArmorType, Artifact, ArtifactKind, Attribute, JsonDirStore, Player, Spell};
use eamon_mechanics::{
    Dice, Shop, ShopConfig, attribute_price, bank, buy_attribute, buy_spell, spell_price,
};
use miette::{IntoDiagnostic, WrapErr};
use tracing::info;

use super::{load_player, save_player};

/// One Main Hall transaction.
pub enum Action {
    Shop(Option<String>),
    Sell(String),
    Witch(String),
    Wizard { spell: String, force: bool },
    Deposit(u32),
    Withdraw(u32),
}

pub fn run(store: &JsonDirStore, id: u32, action: Action, seed: Option<u64>) -> miette::Result<()> {
    let mut player = load_player(store, id)?;
    if player.is_dead() {
        miette::bail!("{} is dead and cannot visit the Main Hall", player.name);
    }
    let mut dice = Dice::from_seed(seed);

    match action {
        Action::Shop(None) => {
            let shop = open_shop(store, &mut dice)?;
            print_stock(&shop.stock());
            println!();
            println!("You have {} gold pieces.", player.gold);
            return Ok(());
        }
        Action::Shop(Some(item)) => {
            let shop = open_shop(store, &mut dice)?;
            let Some(wanted) = shop.find(&item) else {
                miette::bail!("Marcos shrugs. \"I don't sell {item}.\"");
            };
            let bought = shop.buy(&mut player, wanted).into_diagnostic()?;
            save_player(store, &player)?;
            save_shop(store, &shop)?;
            println!(
                "You buy the {} for {} gold.",
                bought.name.bold(),
                bought.value
            );
            return Ok(());
        }
        Action::Sell(item) => {
            let Some(id) = player.inventory.iter().find(|a| a.matches(&item)).map(|a| a.id)
            else {
                miette::bail!("You aren't carrying a {item}!");
            };
            let shop = open_shop(store, &mut dice)?;
            let price = shop.sell(&mut player, id).into_diagnostic()?;
            save_player(store, &player)?;
            save_shop(store, &shop)?;
            println!("Marcos pays you {price} gold.");
            return Ok(());
        }
        Action::Witch(name) => {
            let Some(attribute) = Attribute::parse(&name) else {
                miette::bail!("The witch doesn't sell \"{name}\". Try hardiness, agility or charisma.");
            };
            let price = attribute_price(player.attribute(attribute));
            let value = buy_attribute(&mut player, attribute).into_diagnostic()?;
            println!(
                "The witch takes {price} gold. Your {} is now {}.",
                attribute.name(),
                value.to_string().bold()
            );
        }
        Action::Wizard { spell, force } => {
            let Some(spell) = Spell::parse(&spell) else {
                miette::bail!(
                    "The wizard doesn't teach \"{spell}\". Try blast, heal, power or speed."
                );
            };
            if Spell::is_mastered(player.spell_abilities_original.get(spell)) && !force {
                println!(
                    "{}",
                    format!("You have already mastered {spell}. Pass --force to pay anyway.")
                        .yellow()
                );
                return Ok(());
            }
            let lesson = buy_spell(&mut player, spell, &mut dice).into_diagnostic()?;
            println!(
                "The wizard takes {} gold. You {} {} (ability {}).",
                spell_price(spell),
                lesson.verb(),
                spell,
                lesson.ability.to_string().bold()
            );
        }
        Action::Deposit(amount) => {
            bank::deposit(&mut player, amount).into_diagnostic()?;
            print_balance(&player);
        }
        Action::Withdraw(amount) => {
            bank::withdraw(&mut player, amount).into_diagnostic()?;
            print_balance(&player);
        }
    }

    save_player(store, &player)
}

/// The shop as last saved, stocked fresh on the first visit.
fn open_shop(store: &JsonDirStore, dice: &mut Dice) -> miette::Result<Shop> {
    let saved = store
        .load_stock()
        .into_diagnostic()
        .wrap_err("cannot read the shop's stock")?;
    if let Some(stock) = saved {
        return Ok(Shop::new(stock));
    }
    let shop = Shop::generate(&ShopConfig::default(), dice).into_diagnostic()?;
    save_shop(store, &shop)?;
    info!(items = shop.stock().len(), "shop stocked");
    Ok(shop)
}

fn save_shop(store: &JsonDirStore, shop: &Shop) -> miette::Result<()> {
    store
        .save_stock(&shop.stock())
        .into_diagnostic()
        .wrap_err("cannot save the shop's stock")
}

fn print_stock(stock: &[Artifact]) {
    println!("{}", "Marcos Cavielli's shop".bold());
    for item in stock {
        let detail = match &item.kind {
            ArtifactKind::Weapon(w) | ArtifactKind::MagicWeapon(w) => {
                format!("{} {}d{} {:+}%", w.weapon_type, w.dice, w.sides, w.odds)
            }
            ArtifactKind::Wearable(a) => match a.armor_type {
                ArmorType::Armor => format!("armor AC {}", a.armor_class),
                ArmorType::Shield => format!("shield AC {}", a.armor_class),
            },
            ArtifactKind::Other => String::new(),
        };
        println!(
            "  {:<22} {:>6} gold  {}",
            item.name,
            item.value,
            detail.dimmed()
        );
    }
}

fn print_balance(player: &Player) {
    println!(
        "You have {} gold in hand and {} in the bank.",
        player.gold.to_string().yellow(),
        player.gold_in_bank
    );
}
