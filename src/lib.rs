//! OpenGraph protocol parser
//!
//! Reads `<meta property=… content=…>` pairs from an HTML page and binds them
//! into a typed value:
//! - the bundled [`Ogp`] model, or any struct deriving [`Bind`]
//! - structured properties (`og:image`, `og:image:width`, …) grouped into
//!   list elements
//! - text conversion into numbers, URLs and any `FromStr` type
//!
//! ```ignore
//! let mut ogp = ogp_parser::Ogp::default();
//! ogp_parser::parse(html, &mut ogp)?;
//! ```

extern crate self as ogp_parser;

pub mod binder;
pub mod error;
pub mod fetch;
pub mod model;
pub mod naming;
pub mod parser;
pub mod tag;
pub mod value;

pub use binder::{bind, Binder};
pub use error::{BindError, Error, LocationError};
pub use fetch::{fetch, fetch_with, FetchOptions};
pub use model::{Audio, Image, Ogp, Video};
pub use naming::{default_property_name, to_snake_case, DEFAULT_NAMESPACE};
pub use parser::{parse, Meta, Parser, ParserOptions, PreNodeHook};
pub use tag::Tag;
pub use value::{
    Aggregate, Bind, FieldDef, FromText, Location, Record, RecordShape, Rejected, Scalar, Shape,
};

/// `#[derive(Bind)]`
pub use ogp_parser_derive::Bind;
