//! JSON converters backed by an [`EnumNamingStrategy`].

use std::{fmt, io, marker::PhantomData, sync::Arc};

use serde::{
    Deserializer, Serialize, Serializer,
    de::{self, DeserializeSeed, Visitor},
};
use serde_json::{Number, Value};

use crate::{
    descriptor::{NamedEnum, TypeInfo},
    encoded::EncodedText,
    error::{ConvertError, ErrorKind, NamingError},
    strategy::EnumNamingStrategy,
};

/// Hands out [`EnumConverter`]s for the enum types its strategy supports.
#[derive(Debug)]
pub struct EnumConverterFactory<S> {
    strategy: Arc<S>,
}

impl<S> Clone for EnumConverterFactory<S> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<S: EnumNamingStrategy> EnumConverterFactory<S> {
    pub fn new(strategy: S) -> Self {
        Self::from_shared(Arc::new(strategy))
    }

    pub fn from_shared(strategy: Arc<S>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &Arc<S> {
        &self.strategy
    }

    pub fn supports(&self, ty: &TypeInfo) -> bool {
        self.strategy.can_convert(ty)
    }

    /// Create a converter for `E`, or `None` if the strategy does not support it.
    pub fn create_converter<E: NamedEnum>(&self) -> Option<EnumConverter<E, S>> {
        self.supports(&TypeInfo::of_enum::<E>())
            .then(|| EnumConverter::new(Arc::clone(&self.strategy)))
    }

    /// Like [`create_converter`](Self::create_converter), but reports unsupported types as an
    /// error.
    pub fn try_create_converter<E: NamedEnum>(&self) -> Result<EnumConverter<E, S>, ConvertError> {
        self.create_converter().ok_or(ConvertError::Unsupported {
            type_name: E::descriptor().name,
        })
    }
}

/// Reads and writes one enum type as JSON strings.
///
/// String tokens are parsed through the strategy; number tokens are decoded as the enum's
/// backing value. Anything else is rejected.
pub struct EnumConverter<E, S> {
    strategy: Arc<S>,
    _enum: PhantomData<fn() -> E>,
}

impl<E, S> Clone for EnumConverter<E, S> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
            _enum: PhantomData,
        }
    }
}

impl<E: NamedEnum, S> fmt::Debug for EnumConverter<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumConverter")
            .field("enum", &E::descriptor().name)
            .finish_non_exhaustive()
    }
}

impl<E: NamedEnum, S: EnumNamingStrategy> EnumConverter<E, S> {
    pub fn new(strategy: Arc<S>) -> Self {
        Self {
            strategy,
            _enum: PhantomData,
        }
    }

    pub fn can_convert(&self, ty: &TypeInfo) -> bool {
        self.strategy.can_convert(ty)
    }

    pub fn read(&self, token: &Value) -> Result<E, ConvertError> {
        let type_name = E::descriptor().name;

        match token {
            Value::String(text) => Ok(self
                .strategy
                .parse_or(text, |kind| NamingError::new(kind, type_name, text.as_str()))?),
            Value::Number(number) => self.read_number(number),
            Value::Null => Err(NamingError::new(ErrorKind::NullOrMissingInput, type_name, "null").into()),
            _ => Err(ConvertError::UnsupportedToken { type_name }),
        }
    }

    pub fn read_number(&self, number: &Number) -> Result<E, ConvertError> {
        Ok(self.strategy.parse_number(number)?)
    }

    /// Parse a JSON document holding a single string or number token.
    pub fn read_json(&self, json: &str) -> Result<E, ConvertError> {
        let token: Value = serde_json::from_str(json)?;
        self.read(&token)
    }

    pub fn write(&self, value: E) -> Value {
        Value::String(self.strategy.to_text(value))
    }

    pub fn write_encoded(&self, value: E) -> EncodedText {
        self.strategy.to_encoded_text(value)
    }

    /// Write `value` as a JSON string literal without escaping it again.
    pub fn write_to<W: io::Write>(&self, value: E, writer: W) -> io::Result<()> {
        self.write_encoded(value).write_to(writer)
    }

    /// Wrap `value` so that it serializes through this converter.
    pub fn serializable(&self, value: E) -> Serializable<'_, E, S> {
        Serializable {
            converter: self,
            value,
        }
    }

    /// A seed that deserializes `E` through this converter.
    pub fn seed(&self) -> EnumSeed<'_, E, S> {
        EnumSeed { converter: self }
    }
}

/// An enum value that serializes as its strategy name.
pub struct Serializable<'a, E, S> {
    converter: &'a EnumConverter<E, S>,
    value: E,
}

impl<E: NamedEnum + fmt::Debug, S> fmt::Debug for Serializable<'_, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializable")
            .field("converter", self.converter)
            .field("value", &self.value)
            .finish()
    }
}

impl<E: NamedEnum, S: EnumNamingStrategy> Serialize for Serializable<'_, E, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.serialize_str(self.converter.write_encoded(self.value).as_str())
    }
}

pub struct EnumSeed<'a, E, S> {
    converter: &'a EnumConverter<E, S>,
}

impl<E: NamedEnum, S> fmt::Debug for EnumSeed<'_, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumSeed")
            .field("converter", self.converter)
            .finish()
    }
}

impl<'de, E: NamedEnum, S: EnumNamingStrategy> DeserializeSeed<'de> for EnumSeed<'_, E, S> {
    type Value = E;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<E, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, E: NamedEnum, S: EnumNamingStrategy> Visitor<'de> for EnumSeed<'_, E, S> {
    type Value = E;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a string or integer naming a member of {}", E::descriptor().name)
    }

    fn visit_str<DeErr: de::Error>(self, text: &str) -> Result<E, DeErr> {
        self.converter
            .read(&Value::String(text.to_owned()))
            .map_err(DeErr::custom)
    }

    fn visit_u64<DeErr: de::Error>(self, value: u64) -> Result<E, DeErr> {
        self.converter.read_number(&Number::from(value)).map_err(DeErr::custom)
    }

    fn visit_i64<DeErr: de::Error>(self, value: i64) -> Result<E, DeErr> {
        self.converter.read_number(&Number::from(value)).map_err(DeErr::custom)
    }

    fn visit_f64<DeErr: de::Error>(self, value: f64) -> Result<E, DeErr> {
        match Number::from_f64(value) {
            Some(number) => self.converter.read_number(&number).map_err(DeErr::custom),
            None => Err(DeErr::invalid_value(de::Unexpected::Float(value), &self)),
        }
    }
}
