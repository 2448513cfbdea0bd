//! Configuration for a game session.

/// Default cap on hook-triggered re-dispatch.
pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 8;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible play. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// How deeply hooks may nest secondary commands.
    pub max_dispatch_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_dispatch_depth: DEFAULT_MAX_DISPATCH_DEPTH,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the re-dispatch limit (at least 1).
    pub fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.max_dispatch_depth, 8);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_seed(123)
            .with_max_dispatch_depth(3);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.max_dispatch_depth, 3);
    }

    #[test]
    fn depth_floor() {
        let cfg = SessionConfig::default().with_max_dispatch_depth(0);
        assert_eq!(cfg.max_dispatch_depth, 1);
    }
}
