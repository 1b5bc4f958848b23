//! Derive macro for `ogp_parser::Bind`
//!
//! `#[derive(Bind)]` turns a struct with named fields into a record the
//! OpenGraph binder can fill, or, with `#[ogp(from_str)]`, any `FromStr` type
//! into a single text-converted leaf.

use proc_macro::TokenStream;

mod bind;

/// Derive `ogp_parser::Bind`.
///
/// # Field attributes
///
/// - `#[ogp("og:image,og:image:url")]` - property names the field accepts,
///   first name first. Without it the name is derived from the field
///   identifier: `site_name` -> `og:site_name`.
/// - `#[ogp("-")]` or `#[ogp(skip)]` - never bind this field.
/// - `#[ogp(flatten)]` - expose the fields of a nested record directly.
///
/// Only `pub` fields are bound. The type must implement `Default`; empty
/// optional fields and new list elements are built from it.
///
/// # Container attributes
///
/// - `#[ogp(from_str)]` - bind the whole type from text through `FromStr`
///   instead of field by field. Works for enums too.
///
/// # Example
///
/// ```ignore
/// use ogp_parser::Bind;
///
/// #[derive(Debug, Default, Bind)]
/// pub struct Image {
///     #[ogp("og:image,og:image:url")]
///     pub url: String,
///     #[ogp("og:image:width")]
///     pub width: i64,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(ogp))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    bind::derive_bind_impl(input)
}
