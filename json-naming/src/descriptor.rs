//! Declarative description of an enum, supplied by `#[derive(NamedEnum)]` or written by hand.

use std::any::TypeId;

/// The backing integer type of an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repr {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

/// An enum discriminant tagged with its backing integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminant {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl std::fmt::Display for Discriminant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
        }
    }
}

impl Discriminant {
    pub fn repr(&self) -> Repr {
        match self {
            Self::I8(_) => Repr::I8,
            Self::I16(_) => Repr::I16,
            Self::I32(_) => Repr::I32,
            Self::I64(_) => Repr::I64,
            Self::U8(_) => Repr::U8,
            Self::U16(_) => Repr::U16,
            Self::U32(_) => Repr::U32,
            Self::U64(_) => Repr::U64,
        }
    }
}

impl Repr {
    /// Decode a decimal integer literal as exactly this width.
    ///
    /// Returns `None` if the literal is not an integer or does not fit.
    pub fn parse_literal(&self, literal: &str) -> Option<Discriminant> {
        // `str::parse` accepts a leading '+', JSON does not.
        if literal.starts_with('+') {
            return None;
        }

        match self {
            Self::I8 => literal.parse().ok().map(Discriminant::I8),
            Self::I16 => literal.parse().ok().map(Discriminant::I16),
            Self::I32 => literal.parse().ok().map(Discriminant::I32),
            Self::I64 => literal.parse().ok().map(Discriminant::I64),
            Self::U8 => literal.parse().ok().map(Discriminant::U8),
            Self::U16 => literal.parse().ok().map(Discriminant::U16),
            Self::U32 => literal.parse().ok().map(Discriminant::U32),
            Self::U64 => literal.parse().ok().map(Discriminant::U64),
        }
    }

    /// Decode a JSON number as exactly this width. Fractional numbers never decode.
    pub fn decode_number(&self, number: &serde_json::Number) -> Option<Discriminant> {
        if let Some(value) = number.as_u64() {
            self.decode_u64(value)
        } else if let Some(value) = number.as_i64() {
            self.decode_i64(value)
        } else {
            None
        }
    }

    fn decode_u64(&self, value: u64) -> Option<Discriminant> {
        match self {
            Self::I8 => i8::try_from(value).ok().map(Discriminant::I8),
            Self::I16 => i16::try_from(value).ok().map(Discriminant::I16),
            Self::I32 => i32::try_from(value).ok().map(Discriminant::I32),
            Self::I64 => i64::try_from(value).ok().map(Discriminant::I64),
            Self::U8 => u8::try_from(value).ok().map(Discriminant::U8),
            Self::U16 => u16::try_from(value).ok().map(Discriminant::U16),
            Self::U32 => u32::try_from(value).ok().map(Discriminant::U32),
            Self::U64 => Some(Discriminant::U64(value)),
        }
    }

    fn decode_i64(&self, value: i64) -> Option<Discriminant> {
        match self {
            Self::I8 => i8::try_from(value).ok().map(Discriminant::I8),
            Self::I16 => i16::try_from(value).ok().map(Discriminant::I16),
            Self::I32 => i32::try_from(value).ok().map(Discriminant::I32),
            Self::I64 => Some(Discriminant::I64(value)),
            Self::U8 => u8::try_from(value).ok().map(Discriminant::U8),
            Self::U16 => u16::try_from(value).ok().map(Discriminant::U16),
            Self::U32 => u32::try_from(value).ok().map(Discriminant::U32),
            Self::U64 => u64::try_from(value).ok().map(Discriminant::U64),
        }
    }
}

/// A declared enum member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    /// The member's identifier as written in source.
    pub ident: &'static str,
    /// Explicit serialized name. Used verbatim when present and non-empty.
    pub rename: Option<&'static str>,
    pub value: Discriminant,
}

impl Member {
    /// The override name, ignoring empty overrides.
    pub fn rename(&self) -> Option<&'static str> {
        self.rename.filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub repr: Repr,
    /// Bitmask enums are never converted by the naming strategies.
    pub flags: bool,
    /// Members in declaration order.
    pub members: &'static [Member],
}

impl EnumDescriptor {
    pub fn member(&self, value: Discriminant) -> Option<&'static Member> {
        self.members.iter().find(|member| member.value == value)
    }

    /// Parse raw member text: an identifier compared case-insensitively, or a decimal literal of
    /// the backing width. Surrounding whitespace is ignored.
    pub fn parse(&self, text: &str) -> Option<Discriminant> {
        let text = text.trim();

        self.members
            .iter()
            .find(|member| member.ident.eq_ignore_ascii_case(text))
            .map(|member| member.value)
            .or_else(|| self.repr.parse_literal(text))
    }
}

/// An enum whose members can be named by the naming strategies.
///
/// Usually derived:
///
/// ```rust
/// use json_naming::NamedEnum;
///
/// #[derive(NamedEnum, Clone, Copy, Debug, PartialEq)]
/// #[repr(u8)]
/// enum Animal {
///     Cat = 1,
///     #[named_enum(rename = "doggo")]
///     Dog = 2,
/// }
/// ```
///
/// `from_discriminant` decides which backing values are accepted from numeric input. Derived
/// implementations accept declared members only; a hand-written implementation for an open
/// newtype may accept any value.
pub trait NamedEnum: Copy + Send + Sync + 'static {
    fn descriptor() -> &'static EnumDescriptor;

    fn discriminant(self) -> Discriminant;

    fn from_discriminant(value: Discriminant) -> Option<Self>;
}

/// Runtime identity of a type, as seen by the naming strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    descriptor: Option<&'static EnumDescriptor>,
}

impl TypeInfo {
    /// A type that is not a named enum.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            descriptor: None,
        }
    }

    pub fn of_enum<E: NamedEnum>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::descriptor().name,
            descriptor: Some(E::descriptor()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> Option<&'static EnumDescriptor> {
        self.descriptor
    }

    pub fn is_enum(&self) -> bool {
        self.descriptor.is_some()
    }
}
