//! The Main Hall bank.

use eamon_core::Player;
use tracing::{info, warn};

use crate::economy::debit;
use crate::error::{MechError, MechResult};

/// Move gold from hand into the bank.
pub fn deposit(player: &mut Player, amount: u32) -> MechResult<()> {
    debit(player, amount)?;
    player.gold_in_bank = player.gold_in_bank.saturating_add(amount);
    info!(amount, balance = player.gold_in_bank, "deposit");
    Ok(())
}

/// Move gold from the bank into hand.
pub fn withdraw(player: &mut Player, amount: u32) -> MechResult<()> {
    if player.gold_in_bank < amount {
        warn!(
            requested = amount,
            available = player.gold_in_bank,
            "withdrawal refused"
        );
        return Err(MechError::InsufficientFunds {
            requested: amount,
            available: player.gold_in_bank,
        });
    }
    player.gold_in_bank -= amount;
    player.gold = player.gold.saturating_add(amount);
    info!(amount, balance = player.gold_in_bank, "withdrawal");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eamon_core::Gender;

    #[test]
    fn deposit_and_withdraw() {
        let mut p = Player::new(1, "Leia", Gender::Female);
        deposit(&mut p, 150).unwrap();
        assert_eq!((p.gold, p.gold_in_bank), (50, 150));
        withdraw(&mut p, 100).unwrap();
        assert_eq!((p.gold, p.gold_in_bank), (150, 50));
    }

    #[test]
    fn overdraw_rejected() {
        let mut p = Player::new(1, "Leia", Gender::Female);
        let before = p.clone();
        assert!(matches!(
            deposit(&mut p, 201),
            Err(MechError::InsufficientGold { needed: 201, available: 200 })
        ));
        assert!(matches!(
            withdraw(&mut p, 1),
            Err(MechError::InsufficientFunds { requested: 1, available: 0 })
        ));
        assert_eq!(p, before);
    }
}
