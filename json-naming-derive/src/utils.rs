use proc_macro2::{Ident, Span};
use syn::Attribute;

/// The backing integer type of the enum, as declared with `#[repr(..)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BackingType {
    /// The `json_naming::Repr` / `json_naming::Discriminant` variant.
    pub(crate) variant: &'static str,
    /// The primitive the discriminant is cast to.
    pub(crate) primitive: &'static str,
    /// Whether the type was chosen without a `#[repr(..)]`.
    pub(crate) implicit: bool,
}

impl BackingType {
    /// Used when no integer `#[repr(..)]` is present.
    pub(crate) const DEFAULT: Self = Self {
        variant: "I32",
        primitive: "i32",
        implicit: true,
    };

    fn from_primitive(primitive: &str) -> Option<Self> {
        let variant = match primitive {
            "i8" => "I8",
            "i16" => "I16",
            "i32" => "I32",
            "i64" | "isize" => "I64",
            "u8" => "U8",
            "u16" => "U16",
            "u32" => "U32",
            "u64" | "usize" => "U64",
            _ => return None,
        };

        let primitive = match variant {
            "I8" => "i8",
            "I16" => "i16",
            "I32" => "i32",
            "I64" => "i64",
            "U8" => "u8",
            "U16" => "u16",
            "U32" => "u32",
            _ => "u64",
        };

        Some(Self {
            variant,
            primitive,
            implicit: false,
        })
    }

    pub(crate) fn variant_ident(&self) -> Ident {
        Ident::new(self.variant, Span::call_site())
    }

    pub(crate) fn primitive_ident(&self) -> Ident {
        Ident::new(self.primitive, Span::call_site())
    }
}

/// Find the integer type in the `#[repr(..)]` attributes, ignoring `C`, `align` and friends.
pub(crate) fn backing_type(attrs: &[Attribute]) -> syn::Result<BackingType> {
    let mut found = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        attr.parse_nested_meta(|meta| {
            let Some(ident) = meta.path.get_ident() else {
                return Ok(());
            };
            let name = ident.to_string();

            if name == "i128" || name == "u128" {
                return Err(meta.error("128-bit enums are not supported by NamedEnum"));
            }

            if let Some(ty) = BackingType::from_primitive(&name) {
                found = Some(ty);
            } else if meta.input.peek(syn::token::Paren) {
                // e.g. `align(8)`
                meta.input.parse::<proc_macro2::Group>()?;
            }

            Ok(())
        })?;
    }

    Ok(found.unwrap_or(BackingType::DEFAULT))
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn defaults_to_i32() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[derive(Clone)])];
        assert_eq!(backing_type(&attrs).unwrap(), BackingType::DEFAULT);
    }

    #[test]
    fn reads_integer_repr() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(C, u8)])];
        let ty = backing_type(&attrs).unwrap();

        assert_eq!(ty.variant, "U8");
        assert_eq!(ty.primitive, "u8");
        assert!(!ty.implicit);
    }

    #[test]
    fn pointer_sized_reprs_widen_to_64_bits() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(isize)])];
        assert_eq!(backing_type(&attrs).unwrap().variant, "I64");

        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(usize, align(8))])];
        assert_eq!(backing_type(&attrs).unwrap().primitive, "u64");
    }

    #[test]
    fn skips_arguments_of_other_hints() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(align(16), i16)])];
        assert_eq!(backing_type(&attrs).unwrap().variant, "I16");

        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(u32)]), parse_quote!(#[repr(align(4))])];
        assert_eq!(backing_type(&attrs).unwrap().primitive, "u32");
    }

    #[test]
    fn rejects_128_bit_reprs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[repr(u128)])];
        assert!(backing_type(&attrs).is_err());
    }
}
