//! Enum naming strategies: bidirectional, cached conversion between enum members and text.

use std::any::TypeId;

use crate::{
    cache::{DEFAULT_FLAGS_CACHE_CAPACITY, FlagsCache, Lookup, TypeCache},
    case::Separators,
    descriptor::{NamedEnum, TypeInfo},
    encoded::EncodedText,
    error::{ErrorKind, NamingError},
    names::EnumNames,
};

#[cfg(feature = "metrics")]
use crate::metrics::{Cache, CacheMetrics};

/// Converts enum members to text and back.
///
/// The same lookups back both the JSON converters and the model binder, which report failures
/// differently; the `*_or` methods therefore let the caller build the error from an
/// [`ErrorKind`].
pub trait EnumNamingStrategy: Send + Sync {
    /// Whether this strategy converts `ty`. Only enums that are not flags enums are converted.
    fn can_convert(&self, ty: &TypeInfo) -> bool;

    /// The serialized name of `value`.
    fn to_text<E: NamedEnum>(&self, value: E) -> String;

    /// The serialized name of `value`, pre-encoded for JSON writers.
    fn to_encoded_text<E: NamedEnum>(&self, value: E) -> EncodedText;

    /// Parse `text` as a member of `E`, calling `on_error` if nothing matches.
    fn parse_or<E: NamedEnum, X>(&self, text: &str, on_error: impl FnOnce(ErrorKind) -> X) -> Result<E, X>;

    /// Decode `number` as the backing value of `E` without consulting any names.
    fn parse_number_or<E: NamedEnum, X>(
        &self,
        number: &serde_json::Number,
        on_error: impl FnOnce(ErrorKind) -> X,
    ) -> Result<E, X> {
        let Some(value) = E::descriptor().repr.decode_number(number) else {
            return Err(on_error(ErrorKind::InvalidNumericLiteral));
        };

        E::from_discriminant(value).ok_or_else(|| on_error(ErrorKind::NoMatchingMember))
    }

    fn parse<E: NamedEnum>(&self, text: &str) -> Result<E, NamingError> {
        self.parse_or(text, |kind| NamingError::new(kind, E::descriptor().name, text))
    }

    fn parse_number<E: NamedEnum>(&self, number: &serde_json::Number) -> Result<E, NamingError> {
        self.parse_number_or(number, |kind| {
            NamingError::new(kind, E::descriptor().name, number.to_string())
        })
    }
}

/// Names enum members by converting their identifiers with a [`Separators`] pair.
///
/// Both caches belong to the instance and start empty:
/// - the flags cache is bounded and emptied as a whole on overflow;
/// - the name cache holds one mapping per enum type and is never evicted.
///
/// # Example
/// ```rust
/// use json_naming::{CaseSeparatedStrategy, EnumNamingStrategy, NamedEnum};
///
/// #[derive(NamedEnum, Clone, Copy, Debug, PartialEq)]
/// enum Phonetic {
///     Alpha,
///     DeltaFoxtrot,
/// }
///
/// let strategy = CaseSeparatedStrategy::kebab_case();
/// assert_eq!(strategy.to_text(Phonetic::DeltaFoxtrot), "delta-foxtrot");
/// assert_eq!(strategy.parse::<Phonetic>("delta-foxtrot"), Ok(Phonetic::DeltaFoxtrot));
/// ```
#[derive(Debug)]
pub struct CaseSeparatedStrategy {
    separators: Separators,
    flags: FlagsCache,
    names: TypeCache<EnumNames>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl Default for CaseSeparatedStrategy {
    fn default() -> Self {
        Self::snake_case()
    }
}

impl CaseSeparatedStrategy {
    pub fn snake_case() -> Self {
        Self::new(Separators::SNAKE)
    }

    pub fn kebab_case() -> Self {
        Self::new(Separators::KEBAB)
    }

    pub fn new(separators: Separators) -> Self {
        Self::builder().with_separators(separators).build()
    }

    /// Create a new builder. It is initialized with snake_case separators, a flags cache of
    /// [`DEFAULT_FLAGS_CACHE_CAPACITY`] entries and the default registry.
    pub fn builder() -> StrategyBuilder {
        StrategyBuilder::default()
    }

    pub fn separators(&self) -> Separators {
        self.separators
    }

    /// Number of types whose flags check is currently memoized.
    pub fn flags_cache_len(&self) -> usize {
        self.flags.len()
    }

    /// Number of enum types with a cached name mapping.
    pub fn names_cache_len(&self) -> usize {
        self.names.len()
    }

    fn names<E: NamedEnum>(&self) -> std::sync::Arc<EnumNames> {
        let lookup = self.names.get_or_insert_with(TypeId::of::<E>(), || {
            EnumNames::build(E::descriptor(), self.separators)
        });

        #[cfg(feature = "metrics")]
        self.record(Cache::Names, &lookup);

        lookup.value
    }

    #[cfg(feature = "metrics")]
    fn record<T>(&self, cache: Cache, lookup: &Lookup<T>) {
        if lookup.hit {
            self.metrics.hit(cache);
        } else {
            self.metrics.miss(cache);
        }

        if lookup.cleared {
            self.metrics.cleared();
        }
    }
}

impl EnumNamingStrategy for CaseSeparatedStrategy {
    fn can_convert(&self, ty: &TypeInfo) -> bool {
        let Some(descriptor) = ty.descriptor() else {
            return false;
        };

        let lookup: Lookup<bool> = self.flags.get_or_insert_with(ty.id(), || descriptor.flags);
        if lookup.cleared {
            tracing::debug!(type_name = ty.name(), "flags cache overflowed, cleared");
        }

        #[cfg(feature = "metrics")]
        self.record(Cache::Flags, &lookup);

        !lookup.value
    }

    fn to_text<E: NamedEnum>(&self, value: E) -> String {
        self.to_encoded_text(value).as_str().to_owned()
    }

    fn to_encoded_text<E: NamedEnum>(&self, value: E) -> EncodedText {
        let discriminant = value.discriminant();

        match self.names::<E>().name(discriminant) {
            Some(text) => text.clone(),
            // Only reachable for hand-written enums that accept undeclared values.
            None => EncodedText::new(&discriminant.to_string()),
        }
    }

    fn parse_or<E: NamedEnum, X>(&self, text: &str, on_error: impl FnOnce(ErrorKind) -> X) -> Result<E, X> {
        let parsed = self
            .names::<E>()
            .value(text)
            .and_then(E::from_discriminant)
            // Fall back to the raw identifiers, so e.g. both `delta_foxtrot` and `DeltaFoxtrot`
            // are accepted.
            .or_else(|| E::descriptor().parse(text).and_then(E::from_discriminant));

        parsed.ok_or_else(|| on_error(ErrorKind::NoMatchingMember))
    }
}

/// Builder for a [`CaseSeparatedStrategy`].
#[derive(Debug, Clone)]
pub struct StrategyBuilder {
    separators: Separators,
    flags_cache_capacity: usize,
    #[cfg(feature = "metrics")]
    registry: Option<prometheus::Registry>,
}

impl Default for StrategyBuilder {
    fn default() -> Self {
        Self {
            separators: Separators::SNAKE,
            flags_cache_capacity: DEFAULT_FLAGS_CACHE_CAPACITY,
            #[cfg(feature = "metrics")]
            registry: None,
        }
    }
}

impl StrategyBuilder {
    /// Set the separators used to convert member identifiers.
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    /// Set how many flags checks are memoized before the cache is cleared. At least one.
    pub fn with_flags_cache_capacity(mut self, capacity: usize) -> Self {
        self.flags_cache_capacity = capacity;
        self
    }

    /// Set the registry to record cache metrics in.
    #[cfg(feature = "metrics")]
    pub fn with_registry(mut self, registry: &prometheus::Registry) -> Self {
        self.registry = Some(registry.clone());
        self
    }

    pub fn build(self) -> CaseSeparatedStrategy {
        #[cfg(feature = "metrics")]
        let metrics = match &self.registry {
            Some(registry) => CacheMetrics::new(registry, self.separators),
            None => CacheMetrics::new(prometheus::default_registry(), self.separators),
        };

        CaseSeparatedStrategy {
            separators: self.separators,
            flags: FlagsCache::bounded(self.flags_cache_capacity),
            names: TypeCache::new(),
            #[cfg(feature = "metrics")]
            metrics,
        }
    }
}
