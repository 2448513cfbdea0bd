//! Error types for the rules engine.

use eamon_core::CoreError;

/// Errors that can occur while resolving dice, purchases, and transfers.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A dice expression had zero sides or could not be parsed.
    #[error("invalid dice: {0}")]
    InvalidDiceSpec(String),

    /// The player cannot afford a purchase.
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold {
        /// The price.
        needed: u32,
        /// Gold in hand.
        available: u32,
    },

    /// The bank account holds less than the requested withdrawal.
    #[error("not enough gold in the bank: asked for {requested}, have {available}")]
    InsufficientFunds {
        /// Requested amount.
        requested: u32,
        /// Gold in the bank.
        available: u32,
    },

    /// The shop has no such item.
    #[error("the shop doesn't have {0}")]
    NotInStock(String),

    /// The player doesn't own the item.
    #[error("you don't have {0}")]
    NotInInventory(String),

    /// An entity operation failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for rules operations.
pub type MechResult<T> = Result<T, MechError>;
