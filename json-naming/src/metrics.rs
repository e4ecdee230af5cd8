//! Prometheus counters for the strategy caches.
//!
//! The collectors are shared by every strategy in the process and told apart by the
//! `strategy` label, the separator the strategy emits. Building a strategy registers them on its
//! registry once; later strategies reuse the registration.
//!
//! # Metrics
//! - `json_naming_cache_lookups_total{strategy, cache, outcome}`: Lookups against the `flags`
//!   and `names` caches, by `hit` or `miss`.
//! - `json_naming_flags_cache_clears_total{strategy}`: Times the bounded flags cache overflowed
//!   and was cleared.

use std::sync::LazyLock;

use prometheus::{IntCounter, IntCounterVec, Opts, Registry, core::Collector};

use crate::case::Separators;

static LOOKUPS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "json_naming_cache_lookups_total",
            "Lookups against the naming strategy caches.",
        ),
        &["strategy", "cache", "outcome"],
    )
    .expect("metric options are valid")
});

static CLEARS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "json_naming_flags_cache_clears_total",
            "Times the bounded flags cache overflowed and was cleared.",
        ),
        &["strategy"],
    )
    .expect("metric options are valid")
});

#[derive(Debug, Clone, Copy)]
pub(crate) enum Cache {
    Flags,
    Names,
}

/// One strategy's view of the shared counters, with its labels resolved.
#[derive(Debug, Clone)]
pub(crate) struct CacheMetrics {
    flags_hits: IntCounter,
    flags_misses: IntCounter,
    names_hits: IntCounter,
    names_misses: IntCounter,
    clears: IntCounter,
}

impl CacheMetrics {
    pub(crate) fn new(registry: &Registry, separators: Separators) -> Self {
        register(registry, LOOKUPS.clone());
        register(registry, CLEARS.clone());

        let strategy = separators.primary.to_string();
        let lookup = |cache, outcome| LOOKUPS.with_label_values(&[strategy.as_str(), cache, outcome]);

        Self {
            flags_hits: lookup("flags", "hit"),
            flags_misses: lookup("flags", "miss"),
            names_hits: lookup("names", "hit"),
            names_misses: lookup("names", "miss"),
            clears: CLEARS.with_label_values(&[strategy.as_str()]),
        }
    }

    pub(crate) fn hit(&self, cache: Cache) {
        match cache {
            Cache::Flags => self.flags_hits.inc(),
            Cache::Names => self.names_hits.inc(),
        }
    }

    pub(crate) fn miss(&self, cache: Cache) {
        match cache {
            Cache::Flags => self.flags_misses.inc(),
            Cache::Names => self.names_misses.inc(),
        }
    }

    pub(crate) fn cleared(&self) {
        self.clears.inc();
    }
}

/// Register a shared collector. A registry that already holds it is left as is.
fn register<C: Collector + 'static>(registry: &Registry, collector: C) {
    match registry.register(Box::new(collector)) {
        Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
        Err(err) => tracing::warn!(%err, "failed to register naming strategy metric"),
    }
}

#[cfg(test)]
mod tests {
    use prometheus::Encoder as _;

    use super::*;

    // Counters are process-wide, so every test uses its own separator.

    fn encode(registry: &Registry) -> String {
        let mut buffer = vec![];
        prometheus::TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn counts_lookups_and_clears() {
        let registry = Registry::new();
        let metrics = CacheMetrics::new(&registry, Separators::new('1', '2'));

        metrics.hit(Cache::Names);
        metrics.hit(Cache::Names);
        metrics.miss(Cache::Flags);
        metrics.cleared();

        assert_eq!(LOOKUPS.with_label_values(&["1", "names", "hit"]).get(), 2);
        assert_eq!(LOOKUPS.with_label_values(&["1", "flags", "miss"]).get(), 1);
        assert_eq!(LOOKUPS.with_label_values(&["1", "flags", "hit"]).get(), 0);
        assert_eq!(CLEARS.with_label_values(&["1"]).get(), 1);

        let output = encode(&registry);
        assert!(output.contains("json_naming_cache_lookups_total"));
        assert!(output.contains("json_naming_flags_cache_clears_total"));
        assert!(output.contains(r#"strategy="1""#));
    }

    #[test]
    fn strategies_sharing_a_registry_keep_their_series() {
        let registry = Registry::new();
        let first = CacheMetrics::new(&registry, Separators::new('3', '4'));
        let second = CacheMetrics::new(&registry, Separators::new('5', '6'));

        first.hit(Cache::Names);
        first.hit(Cache::Names);
        second.hit(Cache::Names);

        assert_eq!(LOOKUPS.with_label_values(&["3", "names", "hit"]).get(), 2);
        assert_eq!(LOOKUPS.with_label_values(&["5", "names", "hit"]).get(), 1);

        let output = encode(&registry);
        assert!(output.contains(r#"strategy="3""#));
        assert!(output.contains(r#"strategy="5""#));
    }

    #[test]
    fn collectors_register_on_every_registry() {
        let first = Registry::new();
        let second = Registry::new();
        let metrics = CacheMetrics::new(&first, Separators::new('7', '8'));
        CacheMetrics::new(&second, Separators::new('7', '8'));

        metrics.cleared();

        for registry in [&first, &second] {
            assert!(encode(registry).contains(r#"json_naming_flags_cache_clears_total{strategy="7"} 1"#));
        }
    }
}
