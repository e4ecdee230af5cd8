use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod utils;

/// Derives `json_naming::NamedEnum` for a fieldless enum.
///
/// The backing type comes from the integer `#[repr(..)]` (`i32` if there is none). Supported
/// attributes:
///
/// - `#[named_enum(flags)]` on the enum: members are bit flags.
/// - `#[named_enum(rename = "...")]` on a variant: serialized name, used verbatim.
#[proc_macro_derive(NamedEnum, attributes(named_enum))]
pub fn named_enum(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    expand::expand(&input)
        .unwrap_or_else(darling::Error::write_errors)
        .into()
}
