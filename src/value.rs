//! Type descriptions consumed by the binder
//!
//! Every bindable type implements [`Bind`]. The static [`Shape`] decides which
//! kind of binder is built for it, and [`Bind::location`] hands out the
//! exclusive handle the binder writes through.

use std::rc::Rc;
use std::sync::Arc;

use crate::error::LocationError;
use crate::tag::Tag;

/// How a type takes part in binding.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// A single leaf converted from text.
    Scalar,
    /// An ordered container of elements.
    Aggregate { element: fn() -> Shape },
    /// A struct-like type with named fields.
    Record(RecordShape),
}

impl Shape {
    /// Placeholder for fields that are never bound (private or excluded).
    pub fn unbound() -> Shape {
        Shape::Scalar
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecordShape {
    pub name: &'static str,
    /// Fields in declaration order. Kept in a `static` so that the slice
    /// identifies the record type.
    pub fields: &'static [FieldDef],
}

/// One declared field of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Field identifier as written in the source.
    pub ident: &'static str,
    /// Explicit tag text, if any.
    pub tag: Option<&'static str>,
    /// Embedded composition: sub-fields are exposed without a prefix.
    pub flatten: bool,
    /// Only settable fields are bound.
    pub settable: bool,
    pub shape: fn() -> Shape,
}

impl FieldDef {
    pub fn tag(&self) -> Tag {
        Tag::declared(self.ident, self.tag, self.flatten)
    }
}

/// A writable handle into the result value.
pub enum Location<'a> {
    Scalar(&'a mut dyn Scalar),
    Aggregate(&'a mut dyn Aggregate),
    Record(&'a mut dyn Record),
}

/// A type the binder can write into.
///
/// Usually derived with `#[derive(Bind)]`, or declared for `FromStr` leaves
/// with [`text_scalar!`](crate::text_scalar).
pub trait Bind {
    fn shape() -> Shape
    where
        Self: Sized;

    fn location(&mut self) -> Result<Location<'_>, LocationError>;

    /// Location for an empty optional slot of this type, filling the slot
    /// first when a value has to exist before it can be written.
    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError>
    where
        Self: Sized,
    {
        let _ = slot;
        Err(LocationError::new("empty value cannot be materialized"))
    }
}

/// Why a leaf refused a text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// The text does not convert to the leaf type.
    Invalid,
    /// The leaf type has no text conversion at all.
    Unsupported,
}

/// Construction of a leaf value from text.
pub trait FromText: Sized {
    fn from_text(text: &str) -> Result<Self, Rejected>;
}

/// A leaf value set from text.
pub trait Scalar {
    /// Type name used in diagnostics.
    fn type_name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Replace the value with the conversion of `text`. On failure the value
    /// must be left untouched.
    fn assign(&mut self, text: &str) -> Result<(), Rejected>;
}

/// An ordered container.
pub trait Aggregate {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a default element. Returns false when the container has a fixed
    /// capacity.
    fn grow(&mut self) -> bool;

    fn element(&mut self, index: usize) -> Option<&mut dyn Bind>;
}

/// A struct-like value whose fields are addressed by declaration index.
pub trait Record {
    fn field(&mut self, index: usize) -> Option<&mut dyn Bind>;
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Declare `FromStr` types as leaves bound through their text conversion.
///
/// ```ignore
/// struct Mime(String);
///
/// impl std::str::FromStr for Mime { /* ... */ }
///
/// ogp_parser::text_scalar!(Mime);
/// ```
#[macro_export]
macro_rules! text_scalar {
    (@leaf $($ty:ty),+) => {$(
        impl $crate::Bind for $ty {
            fn shape() -> $crate::Shape {
                $crate::Shape::Scalar
            }

            fn location(
                &mut self,
            ) -> ::core::result::Result<$crate::Location<'_>, $crate::LocationError> {
                ::core::result::Result::Ok($crate::Location::Scalar(self))
            }

            fn vacant(
                slot: &mut ::core::option::Option<Self>,
            ) -> ::core::result::Result<$crate::Location<'_>, $crate::LocationError> {
                ::core::result::Result::Ok($crate::Location::Scalar(slot))
            }
        }

        impl $crate::Scalar for $ty {
            fn assign(&mut self, text: &str) -> ::core::result::Result<(), $crate::Rejected> {
                *self = <$ty as $crate::FromText>::from_text(text)?;
                ::core::result::Result::Ok(())
            }
        }
    )+};
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromText for $ty {
                fn from_text(text: &str) -> ::core::result::Result<Self, $crate::Rejected> {
                    text.parse::<$ty>().map_err(|_| $crate::Rejected::Invalid)
                }
            }
        )+
        $crate::text_scalar!(@leaf $($ty),+);
    };
}

crate::text_scalar!(String, url::Url);
crate::text_scalar!(i8, i16, i32, i64, i128, isize);
crate::text_scalar!(u8, u16, u32, u64, u128, usize);

macro_rules! float_from_text {
    ($($ty:ty),+) => {$(
        impl FromText for $ty {
            fn from_text(text: &str) -> Result<Self, Rejected> {
                let parsed = text.parse::<$ty>().map_err(|_| Rejected::Invalid)?;
                // Out of range literals parse to infinity; only spelled-out
                // infinities are accepted.
                if parsed.is_infinite() && !is_infinity_literal(text) {
                    return Err(Rejected::Invalid);
                }
                Ok(parsed)
            }
        }
    )+};
}

float_from_text!(f32, f64);
crate::text_scalar!(@leaf f32, f64);

fn is_infinity_literal(text: &str) -> bool {
    let digits = text.trim_start_matches(|c: char| c == '+' || c == '-');
    digits.eq_ignore_ascii_case("inf") || digits.eq_ignore_ascii_case("infinity")
}

// OGP has no boolean vocabulary, so a bool leaf is reported rather than guessed.
impl FromText for bool {
    fn from_text(_text: &str) -> Result<Self, Rejected> {
        Err(Rejected::Unsupported)
    }
}

crate::text_scalar!(@leaf bool);

/// An empty optional leaf is filled by its first successful conversion.
impl<T: FromText> Scalar for Option<T> {
    fn type_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn assign(&mut self, text: &str) -> Result<(), Rejected> {
        *self = Some(T::from_text(text)?);
        Ok(())
    }
}

impl<T: Bind + Default> Bind for Vec<T> {
    fn shape() -> Shape {
        Shape::Aggregate { element: T::shape }
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        Ok(Location::Aggregate(self))
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert_with(Vec::new).location()
    }
}

impl<T: Bind + Default> Aggregate for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn grow(&mut self) -> bool {
        self.push(T::default());
        true
    }

    fn element(&mut self, index: usize) -> Option<&mut dyn Bind> {
        self.get_mut(index).map(|element| element as &mut dyn Bind)
    }
}

impl<T: Bind + Default, const N: usize> Bind for [T; N] {
    fn shape() -> Shape {
        Shape::Aggregate { element: T::shape }
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        Ok(Location::Aggregate(self))
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert_with(|| std::array::from_fn(|_| T::default()))
            .location()
    }
}

impl<T: Bind + Default, const N: usize> Aggregate for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn grow(&mut self) -> bool {
        false
    }

    fn element(&mut self, index: usize) -> Option<&mut dyn Bind> {
        self.get_mut(index).map(|element| element as &mut dyn Bind)
    }
}

impl<T: Bind> Bind for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        if self.is_none() {
            tracing::trace!(ty = short_type_name::<T>(), "materializing optional value");
            return T::vacant(self);
        }
        match self.as_mut() {
            Some(value) => value.location(),
            None => Err(LocationError::new("empty optional value")),
        }
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert(None).location()
    }
}

impl<T: Bind + Default> Bind for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        self.as_mut().location()
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert_with(Box::default).location()
    }
}

impl<T: Bind + Default> Bind for Rc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        Rc::get_mut(self)
            .ok_or(LocationError::new("shared reference"))?
            .location()
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert_with(Rc::default).location()
    }
}

impl<T: Bind + Default> Bind for Arc<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn location(&mut self) -> Result<Location<'_>, LocationError> {
        Arc::get_mut(self)
            .ok_or(LocationError::new("shared reference"))?
            .location()
    }

    fn vacant(slot: &mut Option<Self>) -> Result<Location<'_>, LocationError> {
        slot.get_or_insert_with(Arc::default).location()
    }
}
