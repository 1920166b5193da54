//! Construction-time settings.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::{Error, Result};

/// Upper bound on the number of levels. 64 levels covers any list that fits in memory.
pub const MAX_LEVELS: usize = 64;

/// Levels used by `Config::default()`. 16 levels covers billions of elements.
pub const DEFAULT_LEVELS: usize = 16;

/// Settings for building a [`SkipList`](crate::SkipList).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of levels in the ladder, fixed for the list's lifetime.
    pub levels: usize,
    /// Seed for the promotion coin. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    pub fn new(levels: usize) -> Self {
        Config { levels, seed: None }
    }

    /// Make promotion decisions reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the level count.
    pub fn validate(&self) -> Result<()> {
        validate_levels(self.levels)
    }

    /// Build the coin source described by this config.
    pub(crate) fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_LEVELS)
    }
}

pub(crate) fn validate_levels(levels: usize) -> Result<()> {
    if levels == 0 || levels > MAX_LEVELS {
        return Err(Error::InvalidConfiguration {
            levels,
            max: MAX_LEVELS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert_eq!(config.levels, DEFAULT_LEVELS);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_levels() {
        assert_eq!(
            Config::new(0).validate(),
            Err(Error::InvalidConfiguration {
                levels: 0,
                max: MAX_LEVELS
            })
        );
    }

    #[test]
    fn rejects_too_many_levels() {
        assert!(Config::new(MAX_LEVELS).validate().is_ok());
        assert!(Config::new(MAX_LEVELS + 1).validate().is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = Config::new(4).with_seed(7);
        let mut a = config.rng();
        let mut b = config.rng();
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
