//! Naive vs memoized rebuilding of expensive chart primitives.
//!
//! Both chart models render through a [`Memo`]. Under
//! [`RenderStrategy::Naive`] every frame rebuilds the primitive; under
//! [`RenderStrategy::Memoized`] it is rebuilt only when its key changes.

use std::fmt;
use std::str::FromStr;

use statchart_core::{ChartError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderStrategy {
    /// Rebuild everything on every interaction
    Naive,
    /// Rebuild only when inputs change
    #[default]
    Memoized,
}

impl RenderStrategy {
    pub const ALL: [RenderStrategy; 2] = [RenderStrategy::Naive, RenderStrategy::Memoized];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderStrategy::Naive => "naive",
            RenderStrategy::Memoized => "memoized",
        }
    }
}

impl fmt::Display for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderStrategy {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "old" => Ok(RenderStrategy::Naive),
            "memoized" | "new" => Ok(RenderStrategy::Memoized),
            other => Err(ChartError::invalid_argument(format!(
                "unknown render strategy '{other}'"
            ))),
        }
    }
}

/// Counters for comparing strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames: u64,
    pub expensive_rebuilds: u64,
    pub cache_hits: u64,
}

impl RenderStats {
    /// Share of expensive lookups served from cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.expensive_rebuilds + self.cache_hits;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}

/// Single-slot cache keyed by `K`.
#[derive(Clone, Debug)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: Option<V>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
        }
    }
}

impl<K: PartialEq + Copy, V: Clone> Memo<K, V> {
    /// Return the cached value for `key`, or build and store a new one.
    /// A failed build leaves the cache empty.
    pub fn get_or_try_build<F>(
        &mut self,
        strategy: RenderStrategy,
        key: K,
        stats: &mut RenderStats,
        build: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let reusable = strategy == RenderStrategy::Memoized && self.key == Some(key);
        let value = match self.value.take() {
            Some(v) if reusable => {
                stats.cache_hits += 1;
                v
            }
            _ => {
                self.key = None;
                let v = build()?;
                stats.expensive_rebuilds += 1;
                self.key = Some(key);
                v
            }
        };
        Ok(self.value.insert(value).clone())
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoized_reuses_until_key_changes() {
        let mut memo: Memo<u32, u32> = Memo::default();
        let mut stats = RenderStats::default();
        let mut builds = 0;
        for key in [1, 1, 1, 2, 2] {
            memo.get_or_try_build(RenderStrategy::Memoized, key, &mut stats, || {
                builds += 1;
                Ok(key * 10)
            })
            .unwrap();
        }
        assert_eq!(builds, 2);
        assert_eq!(stats.expensive_rebuilds, 2);
        assert_eq!(stats.cache_hits, 3);
        assert!((stats.hit_rate() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn naive_always_rebuilds() {
        let mut memo: Memo<u32, u32> = Memo::default();
        let mut stats = RenderStats::default();
        for _ in 0..4 {
            let v = memo
                .get_or_try_build(RenderStrategy::Naive, 7, &mut stats, || Ok(70))
                .unwrap();
            assert_eq!(v, 70);
        }
        assert_eq!(stats.expensive_rebuilds, 4);
        assert_eq!(stats.cache_hits, 0);
    }

    #[test]
    fn failed_build_is_not_cached() {
        let mut memo: Memo<u32, u32> = Memo::default();
        let mut stats = RenderStats::default();
        assert!(memo
            .get_or_try_build(RenderStrategy::Memoized, 1, &mut stats, || {
                Err(ChartError::invalid_argument("boom"))
            })
            .is_err());
        let v = memo
            .get_or_try_build(RenderStrategy::Memoized, 1, &mut stats, || Ok(5))
            .unwrap();
        assert_eq!(v, 5);
        assert_eq!(stats.cache_hits, 0);
    }

    #[test]
    fn parses_strategy_names() {
        assert_eq!("naive".parse::<RenderStrategy>().unwrap(), RenderStrategy::Naive);
        assert_eq!("NEW".parse::<RenderStrategy>().unwrap(), RenderStrategy::Memoized);
        assert!("fast".parse::<RenderStrategy>().is_err());
    }
}
