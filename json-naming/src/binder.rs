//! Model binding of enum values from raw form fields, query strings and route values.
//!
//! The binder reuses the JSON converter: the raw text is wrapped in a JSON string literal and
//! read through the strategy, so binding accepts exactly what deserialization accepts.

use std::{collections::HashMap, future::Ready, sync::Arc};

use serde_json::Number;

use crate::{
    cache::FlagsCache,
    converter::EnumConverter,
    descriptor::{NamedEnum, TypeInfo},
    error::{BindError, ConvertError},
    strategy::EnumNamingStrategy,
};

/// The model-state error recorded when a value cannot be bound.
pub const BIND_ERROR_MESSAGE: &str = "Unable to convert string to enum";

/// Source of raw request values by key.
pub trait ValueProvider {
    /// All values supplied for `key`, or `None` if the key was not supplied at all.
    fn get_values(&self, key: &str) -> Option<&[String]>;
}

impl ValueProvider for HashMap<String, Vec<String>> {
    fn get_values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(Vec::as_slice)
    }
}

impl ValueProvider for HashMap<String, String> {
    fn get_values(&self, key: &str) -> Option<&[String]> {
        self.get(key).map(std::slice::from_ref)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStateEntry {
    /// The raw values that were supplied.
    pub raw_values: Vec<String>,
    pub errors: Vec<String>,
}

/// Raw values and validation errors collected while binding, by model name.
#[derive(Debug, Clone, Default)]
pub struct ModelState {
    entries: HashMap<String, ModelStateEntry>,
}

impl ModelState {
    pub fn set_model_value(&mut self, key: &str, values: &[String]) {
        self.entries.entry(key.to_owned()).or_default().raw_values = values.to_vec();
    }

    pub fn add_model_error(&mut self, key: &str, message: impl Into<String>) {
        self.entries
            .entry(key.to_owned())
            .or_default()
            .errors
            .push(message.into());
    }

    pub fn get(&self, key: &str) -> Option<&ModelStateEntry> {
        self.entries.get(key)
    }

    pub fn is_valid(&self) -> bool {
        self.entries.values().all(|entry| entry.errors.is_empty())
    }
}

/// Everything the binder needs to bind one model of type `E`.
pub struct ModelBindingContext<'a, E> {
    model_name: String,
    value_provider: &'a dyn ValueProvider,
    model_state: ModelState,
    result: Option<E>,
}

impl<E: NamedEnum> std::fmt::Debug for ModelBindingContext<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBindingContext")
            .field("model_name", &self.model_name)
            .field("model_type", &E::descriptor().name)
            .field("model_state", &self.model_state)
            .finish_non_exhaustive()
    }
}

impl<'a, E> ModelBindingContext<'a, E> {
    pub fn new(model_name: impl Into<String>, value_provider: &'a dyn ValueProvider) -> Self {
        Self {
            model_name: model_name.into(),
            value_provider,
            model_state: ModelState::default(),
            result: None,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    /// The bound model, if binding succeeded.
    pub fn result(&self) -> Option<&E> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<E> {
        self.result
    }
}

/// Hands out [`EnumModelBinder`]s for enum types that are not flags enums.
#[derive(Debug)]
pub struct EnumModelBinderProvider<S> {
    strategy: Arc<S>,
    flags: FlagsCache,
}

impl<S: EnumNamingStrategy> EnumModelBinderProvider<S> {
    pub fn new(strategy: Arc<S>) -> Self {
        Self {
            strategy,
            flags: FlagsCache::unbounded(),
        }
    }

    pub fn get_binder(&self, ty: &TypeInfo) -> Option<EnumModelBinder<S>> {
        let descriptor = ty.descriptor()?;
        let flags = self
            .flags
            .get_or_insert_with(ty.id(), || descriptor.flags)
            .value;

        (!flags).then(|| EnumModelBinder::new(Arc::clone(&self.strategy)))
    }
}

/// Binds raw text to an enum value through an [`EnumNamingStrategy`].
#[derive(Debug)]
pub struct EnumModelBinder<S> {
    strategy: Arc<S>,
}

impl<S> Clone for EnumModelBinder<S> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<S: EnumNamingStrategy> EnumModelBinder<S> {
    pub fn new(strategy: Arc<S>) -> Self {
        Self { strategy }
    }

    /// Bind the model described by `context`.
    ///
    /// Fails immediately if there is no context. Otherwise the returned future is already
    /// complete: a value that cannot be converted is logged and recorded as a model-state error,
    /// it never fails the future.
    pub fn bind_model<E: NamedEnum>(
        &self,
        context: Option<&mut ModelBindingContext<'_, E>>,
    ) -> Result<Ready<()>, BindError> {
        let context = context.ok_or(BindError::MissingContext)?;
        self.bind(context);
        Ok(std::future::ready(()))
    }

    fn bind<E: NamedEnum>(&self, context: &mut ModelBindingContext<'_, E>) {
        let provider = context.value_provider;
        let Some(values) = provider.get_values(&context.model_name) else {
            return;
        };

        context.model_state.set_model_value(&context.model_name, values);

        let Some(value) = values.first().filter(|value| !value.is_empty()) else {
            return;
        };

        match self.convert::<E>(value) {
            Ok(model) => context.result = Some(model),
            Err(err) => {
                tracing::error!(
                    %err,
                    model_name = %context.model_name,
                    enum_name = E::descriptor().name,
                    "failed to bind enum value"
                );
                context
                    .model_state
                    .add_model_error(&context.model_name, BIND_ERROR_MESSAGE);
            }
        }
    }

    fn convert<E: NamedEnum>(&self, value: &str) -> Result<E, ConvertError> {
        let converter = EnumConverter::<E, S>::new(Arc::clone(&self.strategy));

        match serde_json::from_str::<Number>(value) {
            Ok(number) => converter.read_number(&number),
            Err(_) => converter.read_json(&format!("\"{value}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        descriptor::{Discriminant, EnumDescriptor, Member, Repr},
        strategy::CaseSeparatedStrategy,
    };

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Sample {
        Alpha,
        Bravo,
    }

    impl NamedEnum for Sample {
        fn descriptor() -> &'static EnumDescriptor {
            static DESCRIPTOR: EnumDescriptor = EnumDescriptor {
                name: "Sample",
                repr: Repr::I32,
                flags: false,
                members: &[
                    Member { ident: "Alpha", rename: None, value: Discriminant::I32(0) },
                    Member { ident: "Bravo", rename: None, value: Discriminant::I32(2) },
                ],
            };
            &DESCRIPTOR
        }

        fn discriminant(self) -> Discriminant {
            Discriminant::I32(self as i32 * 2)
        }

        fn from_discriminant(value: Discriminant) -> Option<Self> {
            match value {
                Discriminant::I32(0) => Some(Self::Alpha),
                Discriminant::I32(2) => Some(Self::Bravo),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug)]
    struct Flags;

    impl NamedEnum for Flags {
        fn descriptor() -> &'static EnumDescriptor {
            static DESCRIPTOR: EnumDescriptor = EnumDescriptor {
                name: "Flags",
                repr: Repr::U8,
                flags: true,
                members: &[],
            };
            &DESCRIPTOR
        }

        fn discriminant(self) -> Discriminant {
            Discriminant::U8(0)
        }

        fn from_discriminant(_: Discriminant) -> Option<Self> {
            Some(Self)
        }
    }

    fn binder() -> EnumModelBinder<CaseSeparatedStrategy> {
        EnumModelBinder::new(Arc::new(CaseSeparatedStrategy::snake_case()))
    }

    fn values(value: &str) -> HashMap<String, String> {
        HashMap::from([("key".to_owned(), value.to_owned())])
    }

    #[test]
    fn provider_binds_plain_enums_only() {
        let provider = EnumModelBinderProvider::new(Arc::new(CaseSeparatedStrategy::snake_case()));

        assert!(provider.get_binder(&TypeInfo::of_enum::<Sample>()).is_some());
        assert!(provider.get_binder(&TypeInfo::of_enum::<Flags>()).is_none());
        assert!(provider.get_binder(&TypeInfo::of::<Vec<String>>()).is_none());
        // Memoized answers stay the same.
        assert!(provider.get_binder(&TypeInfo::of_enum::<Flags>()).is_none());
    }

    #[test]
    fn missing_context_fails_immediately() {
        let result = binder().bind_model::<Sample>(None);
        assert_eq!(result.unwrap_err(), BindError::MissingContext);
    }

    #[tokio::test]
    async fn binds_member_names() {
        let provider = values("Bravo");
        let mut context = ModelBindingContext::<Sample>::new("key", &provider);

        binder().bind_model(Some(&mut context)).unwrap().await;

        assert_eq!(context.result(), Some(&Sample::Bravo));
        assert!(context.model_state().is_valid());
        assert_eq!(context.model_state().get("key").unwrap().raw_values, vec!["Bravo"]);
    }

    #[tokio::test]
    async fn binds_converted_names() {
        let provider = values("alpha");
        let mut context = ModelBindingContext::<Sample>::new("key", &provider);

        binder().bind_model(Some(&mut context)).unwrap().await;

        assert_eq!(context.into_result(), Some(Sample::Alpha));
    }

    #[tokio::test]
    async fn binds_numbers() {
        let provider = values("2");
        let mut context = ModelBindingContext::<Sample>::new("key", &provider);

        binder().bind_model(Some(&mut context)).unwrap().await;

        assert_eq!(context.result(), Some(&Sample::Bravo));
    }

    #[tokio::test]
    async fn records_errors_instead_of_failing() {
        for raw in ["charlie", "7", "1e3", "say \"hi\""] {
            let provider = values(raw);
            let mut context = ModelBindingContext::<Sample>::new("key", &provider);

            binder().bind_model(Some(&mut context)).unwrap().await;

            assert_eq!(context.result(), None, "raw: {raw:?}");
            assert!(!context.model_state().is_valid());
            assert_eq!(context.model_state().get("key").unwrap().errors, vec![BIND_ERROR_MESSAGE]);
        }
    }

    #[tokio::test]
    async fn absent_and_empty_values_are_skipped() {
        let provider = HashMap::<String, Vec<String>>::from([("empty".to_owned(), vec![String::new()])]);

        let mut absent = ModelBindingContext::<Sample>::new("key", &provider);
        binder().bind_model(Some(&mut absent)).unwrap().await;
        assert_eq!(absent.result(), None);
        assert!(absent.model_state().get("key").is_none());

        let mut empty = ModelBindingContext::<Sample>::new("empty", &provider);
        binder().bind_model(Some(&mut empty)).unwrap().await;
        assert_eq!(empty.result(), None);
        assert!(empty.model_state().is_valid());
        assert_eq!(empty.model_state().get("empty").unwrap().raw_values, vec![String::new()]);
    }
}
