//! snake_case and kebab-case naming for JSON, and enum naming strategies built on them.
//!
//! - [`case`]: The case converter. One routine, parameterized by a [`Separators`] pair.
//! - [`NamingPolicy`]: Property-name policies for `serde_json` values.
//! - [`CaseSeparatedStrategy`]: Converts enum members to their serialized names and back, with
//!   per-instance caches.
//! - [`EnumConverterFactory`] / [`EnumConverter`]: Read and write enums as JSON tokens.
//! - [`EnumModelBinderProvider`] / [`EnumModelBinder`]: Bind raw request values to enums.
//!
//! Enums describe themselves through [`NamedEnum`], usually derived:
//!
//! ```rust
//! use json_naming::{CaseSeparatedStrategy, EnumConverterFactory, NamedEnum};
//!
//! #[derive(NamedEnum, Clone, Copy, Debug, PartialEq)]
//! enum AnimalSound {
//!     BarkBark,
//!     #[named_enum(rename = "MEOW")]
//!     Meow,
//! }
//!
//! let factory = EnumConverterFactory::new(CaseSeparatedStrategy::snake_case());
//! let converter = factory.create_converter::<AnimalSound>().unwrap();
//!
//! assert_eq!(converter.write(AnimalSound::BarkBark), "bark_bark");
//! assert_eq!(converter.read_json(r#""MEOW""#).unwrap(), AnimalSound::Meow);
//! assert_eq!(converter.read_json("0").unwrap(), AnimalSound::BarkBark);
//! ```

// Lets code generated by `#[derive(NamedEnum)]` name this crate from inside it.
#[allow(unused_extern_crates)]
extern crate self as json_naming;

pub mod binder;
mod cache;
pub mod case;
pub mod converter;
pub mod descriptor;
mod encoded;
mod error;
#[cfg(feature = "metrics")]
mod metrics;
mod names;
mod policy;
pub mod strategy;

pub use binder::{
    BIND_ERROR_MESSAGE, EnumModelBinder, EnumModelBinderProvider, ModelBindingContext, ModelState,
    ModelStateEntry, ValueProvider,
};
pub use cache::DEFAULT_FLAGS_CACHE_CAPACITY;
pub use case::{CaseExt, Separators};
pub use converter::{EnumConverter, EnumConverterFactory, EnumSeed, Serializable};
pub use descriptor::{Discriminant, EnumDescriptor, Member, NamedEnum, Repr, TypeInfo};
pub use encoded::EncodedText;
pub use error::{BindError, ConvertError, ErrorKind, NamingError};
pub use policy::NamingPolicy;
pub use strategy::{CaseSeparatedStrategy, EnumNamingStrategy, StrategyBuilder};

#[cfg(feature = "derive")]
pub use json_naming_derive::NamedEnum;
