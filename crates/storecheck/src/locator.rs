//! Locators: how an element is found on the rendered page.
//!
//! A [`Locator`] is a strategy tag plus its selection string. The strategy set
//! is the W3C WebDriver one, so every variant maps onto a backend lookup
//! without string parsing.

use std::fmt;

/// Element selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `id` attribute
    Id,
    /// CSS selector
    Css,
    /// XPath expression
    XPath,
    /// `name` attribute
    Name,
    /// Exact anchor text
    LinkText,
    /// Element tag name
    TagName,
}

impl Strategy {
    /// WebDriver name of the strategy
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Css => "css selector",
            Self::XPath => "xpath",
            Self::Name => "name",
            Self::LinkText => "link text",
            Self::TagName => "tag name",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy-tagged element locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Match by `id` attribute
    Id(String),
    /// Match by CSS selector (e.g. `.float-cart__close-btn`)
    Css(String),
    /// Match by XPath expression
    XPath(String),
    /// Match by `name` attribute
    Name(String),
    /// Match anchors by their exact text
    LinkText(String),
    /// Match by tag name
    TagName(String),
}

impl Locator {
    /// Create an id locator
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    /// Create a CSS locator
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    /// Create an XPath locator
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self::XPath(value.into())
    }

    /// Create a name locator
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self::Name(value.into())
    }

    /// Create a link-text locator
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self::LinkText(value.into())
    }

    /// Create a tag-name locator
    #[must_use]
    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::TagName(value.into())
    }

    /// Strategy of this locator
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Id(_) => Strategy::Id,
            Self::Css(_) => Strategy::Css,
            Self::XPath(_) => Strategy::XPath,
            Self::Name(_) => Strategy::Name,
            Self::LinkText(_) => Strategy::LinkText,
            Self::TagName(_) => Strategy::TagName,
        }
    }

    /// Selection string of this locator
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Id(v)
            | Self::Css(v)
            | Self::XPath(v)
            | Self::Name(v)
            | Self::LinkText(v)
            | Self::TagName(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy(), self.value())
    }
}
