/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the entity registry, the adventure loader, and the
/// player store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No entity matched the given id or name.
    #[error("I see no {0} here!")]
    NotFound(String),

    /// The artifact is fixed in place and cannot be picked up.
    #[error("You can't carry the {0}!")]
    NotCarryable(String),

    /// Picking the artifact up would exceed the carrier's weight limit.
    #[error("The {0} is too heavy.")]
    TooHeavy(String),

    /// Two entities of the same kind share an id.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// The entity kind ("room", "monster", "artifact").
        kind: &'static str,
        /// The repeated id.
        id: u32,
    },

    /// A field refers to an entity that does not exist.
    #[error("{from} refers to missing {target}")]
    InvalidReference {
        /// The entity holding the dangling reference.
        from: String,
        /// The missing entity.
        target: String,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed JSON or a document that does not match the schema.
    #[error("invalid data: {0}")]
    Json(#[from] serde_json::Error),

    /// The player store could not read or write a record.
    #[error("store error: {0}")]
    Io(#[from] std::io::Error),
}
