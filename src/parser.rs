//! `<meta property content>` walk over an HTML document
//!
//! Pairs are produced in document order and fed to a [`Binder`] built for
//! the caller's result value.

use std::fmt;

use scraper::{ElementRef, Html};

use crate::binder::{bind, Binder};
use crate::error::BindError;
use crate::value::Bind;

/// Contents of one `<meta>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub property: String,
    pub content: String,
}

impl Meta {
    pub fn new(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            content: content.into(),
        }
    }

    /// Read `property` and `content` from a `<meta>` element.
    pub fn from_element(element: ElementRef<'_>) -> Option<Self> {
        let el = element.value();
        if el.name() != "meta" {
            return None;
        }
        Some(Self::new(el.attr("property")?, el.attr("content")?))
    }

    fn is_complete(&self) -> bool {
        !self.property.is_empty() && !self.content.is_empty()
    }
}

/// Hook that lets other elements count as a `<meta>`, e.g. `<title>`.
pub type PreNodeHook = Box<dyn Fn(ElementRef<'_>) -> Option<Meta> + Send + Sync>;

/// Options for [`Parser`].
#[derive(Default)]
pub struct ParserOptions {
    /// Offered every element before the `<meta>` check.
    pub pre_node: Option<PreNodeHook>,
    /// Also walk `<body>`, for pages that put their meta tags there.
    pub include_body: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_node<F>(mut self, hook: F) -> Self
    where
        F: Fn(ElementRef<'_>) -> Option<Meta> + Send + Sync + 'static,
    {
        self.pre_node = Some(Box::new(hook));
        self
    }

    pub fn include_body(mut self, include_body: bool) -> Self {
        self.include_body = include_body;
        self
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("pre_node", &self.pre_node.is_some())
            .field("include_body", &self.include_body)
            .finish()
    }
}

/// OpenGraph parser.
#[derive(Debug, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `html` and bind its OpenGraph properties into `target`.
    ///
    /// Values bound before a failing property are kept.
    pub fn parse<T: Bind>(&self, html: &str, target: &mut T) -> Result<(), BindError> {
        let document = Html::parse_document(html);
        self.parse_document(&document, target)
    }

    /// Same as [`Parser::parse`] for an already parsed document.
    pub fn parse_document<T: Bind>(
        &self,
        document: &Html,
        target: &mut T,
    ) -> Result<(), BindError> {
        let mut binder = bind(target, None);
        self.walk(document.root_element(), &mut binder)
    }

    fn walk(&self, element: ElementRef<'_>, binder: &mut Binder<'_>) -> Result<(), BindError> {
        match element.value().name() {
            "html" | "head" => return self.walk_children(element, binder),
            "body" if self.options.include_body => return self.walk_children(element, binder),
            "body" => return Ok(()),
            _ => {}
        }

        let meta = self
            .options
            .pre_node
            .as_ref()
            .and_then(|hook| hook(element))
            .or_else(|| Meta::from_element(element));

        match meta {
            Some(meta) if meta.is_complete() => binder.set(&meta.property, &meta.content),
            _ => Ok(()),
        }
    }

    fn walk_children(
        &self,
        element: ElementRef<'_>,
        binder: &mut Binder<'_>,
    ) -> Result<(), BindError> {
        for child in element.children().filter_map(ElementRef::wrap) {
            self.walk(child, binder)?;
        }
        Ok(())
    }
}

/// Parse `html` with default options.
pub fn parse<T: Bind>(html: &str, target: &mut T) -> Result<(), BindError> {
    Parser::new().parse(html, target)
}
