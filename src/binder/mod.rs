//! Type directed binding of `(property, content)` pairs
//!
//! A binder tree is built once per parse from the static [`Shape`] of the
//! result type. It holds only binding state; every `set` call walks the
//! caller's value through exclusive handles down to the slot being written.

mod aggregate;
mod record;
mod scalar;

use crate::error::BindError;
use crate::tag::Tag;
use crate::value::{Bind, Shape};

use aggregate::AggregateBinder;
use record::RecordBinder;
use scalar::ScalarBinder;

/// One node of the binder tree.
#[derive(Debug)]
pub(crate) enum Node {
    Scalar(ScalarBinder),
    Aggregate(AggregateBinder),
    Record(RecordBinder),
}

impl Node {
    /// Pick the binder variant for a declared shape.
    ///
    /// `tag` is the descriptor of the field holding the value; aggregates use
    /// it to tell a new element from a refinement of the current one.
    pub(crate) fn build(tag: Option<Tag>, shape: Shape) -> Self {
        match shape {
            Shape::Scalar => Node::Scalar(ScalarBinder::default()),
            Shape::Aggregate { element } => Node::Aggregate(AggregateBinder::new(tag, element)),
            Shape::Record(record) => {
                let binder = RecordBinder::new(record);
                if binder.is_empty() {
                    // Nothing to bind; a scalar binder over a record is a no-op.
                    Node::Scalar(ScalarBinder::default())
                } else {
                    Node::Record(binder)
                }
            }
        }
    }

    pub(crate) fn set(
        &mut self,
        target: &mut dyn Bind,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        match self {
            Node::Scalar(binder) => binder.set(target, key, value),
            Node::Aggregate(binder) => binder.set(target, key, value),
            Node::Record(binder) => binder.set(target, key, value),
        }
    }
}

/// Binds pairs, in document order, into a caller owned value.
///
/// The binder lives for one pass: values bound before a failing pair stay
/// bound, and nothing carries over to another pass.
pub struct Binder<'a> {
    target: &'a mut dyn Bind,
    node: Node,
}

impl Binder<'_> {
    /// Feed one `(property, content)` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), BindError> {
        self.node.set(&mut *self.target, key, value)
    }
}

impl std::fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder").field("node", &self.node).finish()
    }
}

/// Build the binder tree for `root`.
///
/// `tag` names the root's own properties; it only matters when the root is a
/// list, where it lets sub-properties refine the current element.
pub fn bind<T: Bind>(root: &mut T, tag: Option<Tag>) -> Binder<'_> {
    Binder {
        node: Node::build(tag, T::shape()),
        target: root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bind;

    #[derive(Debug, Default, Bind)]
    struct Opaque {
        #[ogp("-")]
        pub ignored: String,
        hidden: String,
    }

    #[derive(Debug, Default, Bind)]
    struct Page {
        #[ogp("og:title")]
        pub title: String,
    }

    #[test]
    fn test_factory_variants() {
        assert!(matches!(Node::build(None, String::shape()), Node::Scalar(_)));
        assert!(matches!(
            Node::build(None, Vec::<String>::shape()),
            Node::Aggregate(_)
        ));
        assert!(matches!(Node::build(None, Page::shape()), Node::Record(_)));
        assert!(matches!(Node::build(None, Opaque::shape()), Node::Scalar(_)));
    }

    #[test]
    fn test_record_without_bindable_fields_is_a_noop() {
        let mut opaque = Opaque::default();
        let mut binder = bind(&mut opaque, None);
        assert_eq!(binder.set("og:ignored", "x"), Ok(()));
        assert_eq!(binder.set("og:hidden", "x"), Ok(()));
        assert_eq!(opaque.ignored, "");
        assert_eq!(opaque.hidden, "");
    }

    #[test]
    fn test_root_list_always_advances() {
        let mut titles: Vec<String> = Vec::new();
        let mut binder = bind(&mut titles, None);
        binder.set("og:title", "a").unwrap();
        binder.set("og:title:sub", "b").unwrap();
        assert_eq!(titles, ["a", "b"]);
    }

    #[derive(Debug, Default, PartialEq, Bind)]
    #[ogp(from_str)]
    enum Determiner {
        A,
        An,
        The,
        #[default]
        Blank,
    }

    impl std::str::FromStr for Determiner {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "a" => Ok(Self::A),
                "an" => Ok(Self::An),
                "the" => Ok(Self::The),
                "" | "auto" => Ok(Self::Blank),
                _ => Err(()),
            }
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Mime(String);

    impl std::str::FromStr for Mime {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.split_once('/') {
                Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() => {
                    Ok(Self(s.to_ascii_lowercase()))
                }
                _ => Err(()),
            }
        }
    }

    crate::text_scalar!(Mime);

    #[derive(Debug, Default, Bind)]
    struct Custom {
        pub determiner: Determiner,
        #[ogp("og:image:type")]
        pub mime: Option<Mime>,
        pub r#type: String,
        #[ogp(skip)]
        pub skipped: String,
    }

    #[test]
    fn test_custom_convertible_leaves() {
        assert!(matches!(Node::build(None, Determiner::shape()), Node::Scalar(_)));

        let mut custom = Custom::default();
        let mut binder = bind(&mut custom, None);
        binder.set("og:determiner", "an").unwrap();
        binder.set("og:image:type", "Image/PNG").unwrap();
        binder.set("og:type", "website").unwrap();
        binder.set("og:skipped", "x").unwrap();
        assert_eq!(custom.determiner, Determiner::An);
        assert_eq!(custom.mime, Some(Mime("image/png".to_string())));
        assert_eq!(custom.r#type, "website");
        assert_eq!(custom.skipped, "");
    }

    #[test]
    fn test_custom_conversion_error_names_type() {
        let mut custom = Custom::default();
        let mut binder = bind(&mut custom, None);
        let err = binder.set("og:image:type", "png").unwrap_err();
        assert_eq!(
            err.to_string(),
            "og:image:type field is invalid. (type = Mime, value = png)"
        );
        assert_eq!(custom.mime, None);
    }

    #[test]
    fn test_root_list_with_tag_refines() {
        let mut titles: Vec<String> = Vec::new();
        let mut binder = bind(&mut titles, Some(Tag::new(["og:title"])));
        binder.set("og:title", "a").unwrap();
        binder.set("og:title:sub", "b").unwrap();
        binder.set("og:title", "c").unwrap();
        assert_eq!(titles, ["a", "c"]);
    }
}
