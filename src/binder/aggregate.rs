use super::Node;
use crate::error::BindError;
use crate::tag::Tag;
use crate::value::{Bind, Location, Shape};

/// Binds a repeating group into a list or a fixed-size array.
///
/// A key naming the group itself (`og:image`) opens a new element; any other
/// key (`og:image:width`) refines the element opened last. Without a tag, as
/// for a list passed as the parse root, every key opens a new element.
#[derive(Debug)]
pub(crate) struct AggregateBinder {
    tag: Option<Tag>,
    element: fn() -> Shape,
    index: usize,
    /// Binder of the element at `index`, once one is open.
    current: Option<Box<Node>>,
}

impl AggregateBinder {
    pub(crate) fn new(tag: Option<Tag>, element: fn() -> Shape) -> Self {
        Self {
            tag,
            element,
            index: 0,
            current: None,
        }
    }

    pub(crate) fn set(
        &mut self,
        target: &mut dyn Bind,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        let aggregate = match target.location().map_err(|err| err.at(key))? {
            Location::Aggregate(aggregate) => aggregate,
            _ => return Err(BindError::invalid_location(key, "expected a list")),
        };

        let refines = self
            .tag
            .as_ref()
            .is_some_and(|tag| !tag.contains(key));

        if refines {
            if let Some(current) = self.current.as_mut() {
                let element = aggregate
                    .element(self.index)
                    .ok_or_else(|| BindError::invalid_location(key, "list element is gone"))?;
                return current.set(element, key, value);
            }
        }

        let next = if self.current.is_some() {
            self.index + 1
        } else {
            self.index
        };

        // A full fixed-size container drops the new element. The element
        // opened last stays current and keeps taking refinements.
        if next >= aggregate.len() && !aggregate.grow() {
            tracing::debug!(key, capacity = aggregate.len(), "list is full, dropping element");
            return Ok(());
        }
        self.index = next;

        let element = aggregate
            .element(self.index)
            .ok_or_else(|| BindError::invalid_location(key, "list element is gone"))?;
        let current = self
            .current
            .insert(Box::new(Node::build(None, (self.element)())));
        current.set(element, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bind;

    fn image_tag() -> Option<Tag> {
        Some(Tag::new(["og:image"]))
    }

    fn binder_for<T: Bind>(tag: Option<Tag>) -> AggregateBinder {
        match Node::build(tag, T::shape()) {
            Node::Aggregate(binder) => binder,
            other => panic!("expected an aggregate binder, got {other:?}"),
        }
    }

    #[derive(Debug, Default, PartialEq, Bind)]
    struct Image {
        #[ogp("og:image,og:image:url")]
        pub url: String,
        #[ogp("og:image:width")]
        pub width: i64,
    }

    #[test]
    fn test_fixed_array_saturates() {
        let mut images: [String; 3] = Default::default();
        let mut binder = binder_for::<[String; 3]>(image_tag());
        for i in 1..=4 {
            let url = format!("http://example.com/image{i}.png");
            binder.set(&mut images, "og:image", &url).unwrap();
        }
        assert_eq!(
            images,
            [
                "http://example.com/image1.png",
                "http://example.com/image2.png",
                "http://example.com/image3.png",
            ]
        );
    }

    #[test]
    fn test_fixed_array_of_optionals() {
        let mut images: [Option<String>; 3] = Default::default();
        let mut binder = binder_for::<[Option<String>; 3]>(image_tag());
        for i in 1..=4 {
            let url = format!("http://example.com/image{i}.png");
            binder.set(&mut images, "og:image", &url).unwrap();
        }
        assert_eq!(images[0].as_deref(), Some("http://example.com/image1.png"));
        assert_eq!(images[2].as_deref(), Some("http://example.com/image3.png"));
    }

    #[test]
    fn test_full_array_refines_last_element() {
        let mut images: [Image; 1] = Default::default();
        let mut binder = binder_for::<[Image; 1]>(image_tag());
        binder.set(&mut images, "og:image", "u1").unwrap();
        binder.set(&mut images, "og:image", "u2").unwrap();
        binder.set(&mut images, "og:image:width", "400").unwrap();
        binder.set(&mut images, "og:image", "u3").unwrap();
        binder.set(&mut images, "og:image:width", "500").unwrap();
        assert_eq!(images[0], Image { url: "u1".to_string(), width: 400 });
    }

    #[test]
    fn test_empty_array_drops_everything() {
        let mut images: [Image; 0] = [];
        let mut binder = binder_for::<[Image; 0]>(image_tag());
        assert_eq!(binder.set(&mut images, "og:image", "u1"), Ok(()));
        assert_eq!(binder.set(&mut images, "og:image:width", "400"), Ok(()));
    }

    #[test]
    fn test_vec_grows() {
        let mut images: Vec<String> = Vec::new();
        let mut binder = binder_for::<Vec<String>>(image_tag());
        binder.set(&mut images, "og:image", "http://example.com/image1.png").unwrap();
        binder.set(&mut images, "og:image", "http://example.com/image2.png").unwrap();
        assert_eq!(
            images,
            ["http://example.com/image1.png", "http://example.com/image2.png"]
        );

        let mut images: Vec<Option<String>> = Vec::new();
        let mut binder = binder_for::<Vec<Option<String>>>(image_tag());
        binder.set(&mut images, "og:image", "http://example.com/image1.png").unwrap();
        binder.set(&mut images, "og:image", "http://example.com/image2.png").unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].as_deref(), Some("http://example.com/image2.png"));
    }

    #[test]
    fn test_grouping() {
        let mut images: Vec<Image> = Vec::new();
        let mut binder = binder_for::<Vec<Image>>(Some(Tag::new(["og:image", "og:image:url"])));
        binder.set(&mut images, "og:image", "u1").unwrap();
        binder.set(&mut images, "og:image:width", "400").unwrap();
        binder.set(&mut images, "og:image", "u2").unwrap();
        assert_eq!(
            images,
            [
                Image { url: "u1".to_string(), width: 400 },
                Image { url: "u2".to_string(), width: 0 },
            ]
        );
    }

    #[test]
    fn test_alternate_name_opens_element() {
        let mut images: Vec<Image> = Vec::new();
        let mut binder = binder_for::<Vec<Image>>(Some(Tag::new(["og:image", "og:image:url"])));
        binder.set(&mut images, "og:image", "u1").unwrap();
        binder.set(&mut images, "og:image:url", "u2").unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].url, "u2");
    }

    #[test]
    fn test_refinement_before_any_element() {
        let mut images: Vec<Image> = Vec::new();
        let mut binder = binder_for::<Vec<Image>>(image_tag());
        binder.set(&mut images, "og:image:width", "400").unwrap();
        binder.set(&mut images, "og:image", "u1").unwrap();
        assert_eq!(images, [Image { url: String::new(), width: 400 }, Image { url: "u1".to_string(), width: 0 }]);
    }

    #[test]
    fn test_element_error_propagates() {
        let mut images: Vec<Image> = Vec::new();
        let mut binder = binder_for::<Vec<Image>>(image_tag());
        binder.set(&mut images, "og:image", "u1").unwrap();
        let err = binder.set(&mut images, "og:image:width", "invalid").unwrap_err();
        assert!(matches!(err, BindError::Conversion { .. }));
        assert_eq!(images[0].url, "u1");
    }
}
