use darling::{FromDeriveInput, FromVariant, ast::Data, util::Flag};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Generics, Ident, LitStr};

use crate::utils::{BackingType, backing_type};

#[derive(FromDeriveInput, Debug)]
#[darling(attributes(named_enum), supports(enum_unit), forward_attrs(repr))]
pub(super) struct NamedEnumInput {
    ident: Ident,
    generics: Generics,
    attrs: Vec<Attribute>,
    data: Data<NamedVariant, ()>,
    /// Members are bit flags. Strategies refuse to convert flags enums.
    flags: Flag,
}

#[derive(FromVariant, Debug)]
#[darling(attributes(named_enum))]
struct NamedVariant {
    ident: Ident,
    /// Serialized name used verbatim instead of the converted identifier.
    rename: Option<LitStr>,
}

/// Everything the generated impl needs about one variant.
struct MemberBuilder<'a> {
    enum_ident: &'a Ident,
    variant: &'a NamedVariant,
    ty: BackingType,
}

impl MemberBuilder<'_> {
    /// `Enum::Variant as primitive`. Spelled without `Self` so it can sit inside a nested static.
    fn cast(&self) -> TokenStream {
        let enum_ident = self.enum_ident;
        let ident = &self.variant.ident;
        let primitive = self.ty.primitive_ident();
        quote! { #enum_ident::#ident as #primitive }
    }

    fn build_member(&self) -> darling::Result<TokenStream> {
        let ident = self.variant.ident.to_string();
        let rename = match &self.variant.rename {
            Some(rename) if rename.value().is_empty() => {
                return Err(darling::Error::custom("rename must not be empty").with_span(rename));
            }
            Some(rename) => quote! { ::core::option::Option::Some(#rename) },
            None => quote! { ::core::option::Option::None },
        };
        let variant = self.ty.variant_ident();
        let cast = self.cast();

        Ok(quote! {
            ::json_naming::Member {
                ident: #ident,
                rename: #rename,
                value: ::json_naming::Discriminant::#variant(#cast),
            }
        })
    }

    fn build_match(&self) -> TokenStream {
        let ident = &self.variant.ident;
        let cast = self.cast();
        quote! {
            if value == #cast {
                return ::core::option::Option::Some(Self::#ident);
            }
        }
    }

    /// Rejects discriminants that do not survive the cast to the implicit backing type.
    fn build_width_check(&self) -> TokenStream {
        let enum_ident = self.enum_ident;
        let ident = &self.variant.ident;
        let message = format!(
            "discriminant of {enum_ident}::{ident} does not fit in i32, add an integer #[repr]"
        );
        quote! {
            ::core::assert!(
                #enum_ident::#ident as isize == (#enum_ident::#ident as i32) as isize,
                #message
            );
        }
    }
}

pub(super) fn expand(input: &DeriveInput) -> darling::Result<TokenStream> {
    let input = NamedEnumInput::from_derive_input(input)?;
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(
            darling::Error::custom("NamedEnum cannot be derived for generic enums")
                .with_span(&input.generics),
        );
    }

    let ty = backing_type(&input.attrs)?;
    let variants = input
        .data
        .as_ref()
        .take_enum()
        .ok_or_else(|| darling::Error::unsupported_shape("struct").with_span(ident))?;
    if variants.is_empty() {
        return Err(
            darling::Error::custom("NamedEnum requires at least one variant").with_span(ident)
        );
    }

    let builders: Vec<_> = variants
        .into_iter()
        .map(|variant| MemberBuilder {
            enum_ident: ident,
            variant,
            ty,
        })
        .collect();

    let mut errors = darling::Error::accumulator();
    let members: Vec<_> = builders
        .iter()
        .filter_map(|builder| errors.handle(builder.build_member()))
        .collect();
    errors.finish()?;

    let matches = builders.iter().map(MemberBuilder::build_match);

    let width_check = ty.implicit.then(|| {
        let checks = builders.iter().map(MemberBuilder::build_width_check);
        quote! {
            const _: () = {
                #(#checks)*
            };
        }
    });

    let name = ident.to_string();
    let flags = input.flags.is_present();
    let variant = ty.variant_ident();
    let primitive = ty.primitive_ident();

    Ok(quote! {
        #width_check

        impl ::json_naming::NamedEnum for #ident {
            fn descriptor() -> &'static ::json_naming::EnumDescriptor {
                static DESCRIPTOR: ::json_naming::EnumDescriptor = ::json_naming::EnumDescriptor {
                    name: #name,
                    repr: ::json_naming::Repr::#variant,
                    flags: #flags,
                    members: &[#(#members),*],
                };
                &DESCRIPTOR
            }

            fn discriminant(self) -> ::json_naming::Discriminant {
                ::json_naming::Discriminant::#variant(self as #primitive)
            }

            fn from_discriminant(
                value: ::json_naming::Discriminant,
            ) -> ::core::option::Option<Self> {
                let ::json_naming::Discriminant::#variant(value) = value else {
                    return ::core::option::Option::None;
                };
                #(#matches)*
                ::core::option::Option::None
            }
        }
    })
}
