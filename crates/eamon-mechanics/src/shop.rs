//! Marcos Cavielli's weapon and armor shop.
//!
//! The standing inventory is shared by every session in the process. Each
//! buy or sell takes the lock once, so checking the stock and moving the item
//! happen together.

use std::sync::{Mutex, MutexGuard};

use eamon_core::artifact::{Armor, Weapon};
use eamon_core::{
    ArmorType, Artifact, ArtifactId, ArtifactKind, Location, Owner, Player, WeaponType,
};
use tracing::{info, warn};

use crate::dice::Dice;
use crate::economy::{debit, weapon_value};
use crate::error::{MechError, MechResult};

/// Shop item ids start above this so they stay clear of adventure artifacts.
pub const SHOP_ID_BASE: u32 = 10_000;

/// Tuning for the generated stock.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// How many named magic weapons to forge.
    pub magic_weapons: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self { magic_weapons: 3 }
    }
}

impl ShopConfig {
    /// Set the number of magic weapons.
    pub fn with_magic_weapons(mut self, count: usize) -> Self {
        self.magic_weapons = count;
        self
    }
}

/// The shop's standing inventory.
#[derive(Debug, Default)]
pub struct Shop {
    stock: Mutex<Vec<Artifact>>,
}

impl Shop {
    /// A shop selling exactly `stock`.
    pub fn new(stock: Vec<Artifact>) -> Self {
        let stock = stock
            .into_iter()
            .map(|mut a| {
                a.location = Location::Carried(Owner::Shop);
                a
            })
            .collect();
        Self {
            stock: Mutex::new(stock),
        }
    }

    /// A shop with the standard stock: five plain weapons, a few magic
    /// weapons sorted by price, four suits of armor and a shield.
    pub fn generate(config: &ShopConfig, dice: &mut Dice) -> MechResult<Self> {
        Ok(Self::new(standard_stock(config, dice)?))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Artifact>> {
        self.stock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// A copy of the current stock.
    pub fn stock(&self) -> Vec<Artifact> {
        self.lock().clone()
    }

    /// Find an item in stock by name (prefix) or synonym.
    pub fn find(&self, query: &str) -> Option<ArtifactId> {
        self.lock().iter().find(|a| a.matches(query)).map(|a| a.id)
    }

    /// Sell an item to the player. The item moves into the player's
    /// inventory and its value is debited.
    pub fn buy(&self, player: &mut Player, id: ArtifactId) -> MechResult<Artifact> {
        let mut stock = self.lock();
        let index = stock
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| MechError::NotInStock(id.to_string()))?;
        debit(player, stock[index].value)?;

        let mut item = stock.remove(index);
        drop(stock);

        if player.inventory.iter().any(|a| a.id == item.id) {
            item.id = next_free_id(&player.inventory);
        }
        item.location = Location::Carried(Owner::Player);
        info!(item = %item.name, price = item.value, gold = player.gold, "bought from shop");
        player.inventory.push(item.clone());
        Ok(item)
    }

    /// Buy an item from the player at full value.
    pub fn sell(&self, player: &mut Player, id: ArtifactId) -> MechResult<u32> {
        let Some(index) = player.inventory.iter().position(|a| a.id == id) else {
            warn!(%id, "sell refused: not carried");
            return Err(MechError::NotInInventory(id.to_string()));
        };

        let mut stock = self.lock();
        let mut item = player.inventory.remove(index);
        player.ready_weapon = player.ready_weapon.filter(|&w| w != id);
        player.worn_armor.retain(|&w| w != id);
        player.gold = player.gold.saturating_add(item.value);

        let price = item.value;
        if stock.iter().any(|a| a.id == item.id) {
            item.id = next_free_id(&stock);
        }
        item.location = Location::Carried(Owner::Shop);
        info!(item = %item.name, price, gold = player.gold, "sold to shop");
        stock.push(item);
        Ok(price)
    }
}

fn next_free_id(items: &[Artifact]) -> ArtifactId {
    let max = items.iter().map(|a| a.id.0).max().unwrap_or(SHOP_ID_BASE);
    ArtifactId(max.max(SHOP_ID_BASE) + 1)
}

const MAGIC_NAMES: [(WeaponType, &[&str]); 5] = [
    (
        WeaponType::Axe,
        &["Slaymor", "Falcoor", "Ironheart", "Blood Claw", "Orenmir", "Shadowfury", "Mooncleaver"],
    ),
    (
        WeaponType::Bow,
        &["Stinger", "Meteor", "Featherdraw", "Heartpiercer", "Quintain", "Ashwood", "Arrowsong"],
    ),
    (
        WeaponType::Club,
        &["Scrunch", "Warmace", "Earthshatter", "Spinefall", "Justifier", "Haunted Hammer", "Guiding Star"],
    ),
    (
        WeaponType::Spear,
        &["Centuri", "Shiverspine", "Twisted Spike", "Mithril Lance", "Blinkstrike", "Nightbane", "Ebon Halberd"],
    ),
    (
        WeaponType::Sword,
        &["Slasher", "Freedom", "Ghost Reaver", "Doombringer", "Malevolent Crusader", "Swiftblade", "Oathkeeper"],
    ),
];

/// Build the standard stock.
pub fn standard_stock(config: &ShopConfig, dice: &mut Dice) -> MechResult<Vec<Artifact>> {
    let mut next_id = SHOP_ID_BASE;
    let mut id = || {
        next_id += 1;
        next_id
    };
    let shop = Location::Carried(Owner::Shop);
    let mut stock = Vec::new();

    for (weapon_type, sides, value) in [
        (WeaponType::Axe, 6, 25),
        (WeaponType::Bow, 6, 40),
        (WeaponType::Club, 4, 20),
        (WeaponType::Spear, 5, 25),
        (WeaponType::Sword, 8, 30),
    ] {
        let name = if weapon_type == WeaponType::Club {
            "mace"
        } else {
            weapon_type.name()
        };
        stock.push(
            Artifact::new(id(), name, shop)
                .with_description(format!("You see a standard {name}."))
                .with_value(value)
                .with_weight(5)
                .with_kind(ArtifactKind::Weapon(Weapon {
                    weapon_type,
                    odds: 10,
                    dice: 1,
                    sides,
                    hands: if weapon_type == WeaponType::Bow { 2 } else { 1 },
                })),
        );
    }

    let mut names: Vec<(WeaponType, Vec<&str>)> = MAGIC_NAMES
        .iter()
        .map(|(t, n)| (*t, n.to_vec()))
        .collect();
    let total = config.magic_weapons;
    let mut magic = Vec::with_capacity(total);
    for i in 0..total {
        let type_index = dice.roll(1, 5)? as usize - 1;
        let (weapon_type, pool) = &mut names[type_index];
        let weapon_type = *weapon_type;
        let name = match dice.pick_index(pool.len()) {
            Some(n) => pool.remove(n).to_string(),
            None => format!("Forged {} {}", weapon_type, i + 1),
        };
        let odds = dice.roll(1, 7)? as i32 * 5 - 10;
        // One small, one large, the rest in between.
        let count = if i * 100 <= total * 33 {
            1
        } else if i * 100 >= total * 66 {
            3
        } else {
            2
        };
        let sides = 8 - count * 2 + dice.roll(1, 4)? * 2;
        let weapon = Weapon {
            weapon_type,
            odds,
            dice: count,
            sides,
            hands: if weapon_type == WeaponType::Bow { 2 } else { 1 },
        };
        let article = if weapon_type == WeaponType::Axe { "an" } else { "a" };
        magic.push(
            Artifact::new(0, name.clone(), shop)
                .with_description(format!("You see {article} {weapon_type} named {name}."))
                .with_value(weapon_value(&weapon))
                .with_weight(3)
                .with_kind(ArtifactKind::MagicWeapon(weapon)),
        );
    }
    magic.sort_by_key(|a| a.value);
    for mut item in magic {
        item.id = ArtifactId(id());
        stock.push(item);
    }

    for (name, value, armor_class, armor_penalty, weight) in [
        ("leather armor", 100, 1, 10, 5),
        ("chain mail", 250, 3, 20, 15),
        ("scale armor", 350, 4, 40, 18),
        ("plate armor", 500, 5, 60, 20),
    ] {
        stock.push(
            Artifact::new(id(), name, shop)
                .with_description(format!("You see a standard set of {name}."))
                .with_value(value)
                .with_weight(weight)
                .with_kind(ArtifactKind::Wearable(Armor {
                    armor_type: ArmorType::Armor,
                    armor_class,
                    armor_penalty,
                })),
        );
    }
    stock.push(
        Artifact::new(id(), "shield", shop)
            .with_description("You see a standard shield.")
            .with_value(50)
            .with_weight(5)
            .with_kind(ArtifactKind::Wearable(Armor {
                armor_type: ArmorType::Shield,
                armor_class: 1,
                armor_penalty: 5,
            })),
    );

    Ok(stock)
}
