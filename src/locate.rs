use anyhow::Result;
use regex::Regex;
use scraper::{ElementRef, Html};
use std::fmt;
use tracing::error;

use crate::error::ScrapeError;

/// How an attribute value is compared.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    Exact(String),
    OneOf(Vec<String>),
    Pattern(Regex),
}

impl AttrMatch {
    pub fn exact(value: impl Into<String>) -> Self {
        AttrMatch::Exact(value.into())
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrMatch::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn pattern(regex: &Regex) -> Self {
        AttrMatch::Pattern(regex.clone())
    }

    fn matches_value(&self, value: &str) -> bool {
        match self {
            AttrMatch::Exact(expected) => value == expected,
            AttrMatch::OneOf(options) => options.iter().any(|o| o == value),
            AttrMatch::Pattern(regex) => regex.is_match(value),
        }
    }

    /// `class` holds a space separated list, so any single class may match
    /// as well as the whole attribute string.
    fn matches(&self, name: &str, value: &str) -> bool {
        if self.matches_value(value) {
            return true;
        }
        name == "class" && value.split_whitespace().any(|class| self.matches_value(class))
    }
}

impl fmt::Display for AttrMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrMatch::Exact(value) => write!(f, "={:?}", value),
            AttrMatch::OneOf(options) => write!(f, " in {{{}}}", options.join(", ")),
            AttrMatch::Pattern(regex) => write!(f, "~/{}/", regex.as_str()),
        }
    }
}

/// A tag name plus attribute constraints, all of which must hold.
#[derive(Debug, Clone)]
pub struct TagQuery {
    tag: String,
    attrs: Vec<(String, AttrMatch)>,
}

impl TagQuery {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, matcher: AttrMatch) -> Self {
        self.attrs.push((name.into(), matcher));
        self
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        el.name().eq_ignore_ascii_case(&self.tag)
            && self.attrs.iter().all(|(name, matcher)| {
                el.attr(name)
                    .is_some_and(|value| matcher.matches(name, value))
            })
    }
}

impl fmt::Display for TagQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for (name, matcher) in &self.attrs {
            write!(f, "[{}{}]", name, matcher)?;
        }
        Ok(())
    }
}

/// Anything a query can search under: a whole document or one element.
pub trait Scope<'a> {
    fn scope(self) -> ElementRef<'a>;
}

impl<'a> Scope<'a> for &'a Html {
    fn scope(self) -> ElementRef<'a> {
        self.root_element()
    }
}

impl<'a> Scope<'a> for ElementRef<'a> {
    fn scope(self) -> ElementRef<'a> {
        self
    }
}

/// Every descendant of `root` (root excluded) matching `query`, in
/// document order.
pub fn locate_all<'a>(root: impl Scope<'a>, query: &TagQuery) -> Vec<ElementRef<'a>> {
    let root = root.scope();
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| query.matches(el))
        .collect()
}

/// First descendant of `root` matching `query`, if any.
pub fn try_locate<'a>(root: impl Scope<'a>, query: &TagQuery) -> Option<ElementRef<'a>> {
    let root = root.scope();
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| query.matches(el))
}

/// First descendant of `root` matching `query`. A miss is logged with the
/// query and the path down to `root`, then returned as
/// [`ScrapeError::TagNotFound`].
pub fn locate<'a>(root: impl Scope<'a>, query: &TagQuery) -> Result<ElementRef<'a>> {
    let root = root.scope();
    match try_locate(root, query) {
        Some(found) => Ok(found),
        None => {
            let trace = trace(&root);
            error!(action = "locate", component = "tag_locator", query = %query, trace = %trace, "Tag not found");
            Err(ScrapeError::TagNotFound {
                query: query.to_string(),
                trace,
            }
            .into())
        }
    }
}

/// Path from the document root down to `element`, e.g.
/// `html > body > div#main.document`.
pub fn trace(element: &ElementRef<'_>) -> String {
    let mut parts: Vec<String> = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .map(|el| describe(&el))
        .collect();
    parts.reverse();
    parts.push(describe(element));
    parts.join(" > ")
}

fn describe(element: &ElementRef<'_>) -> String {
    let el = element.value();
    let mut out = el.name().to_string();
    if let Some(id) = el.id() {
        out.push('#');
        out.push_str(id);
    }
    for class in el.classes() {
        out.push('.');
        out.push_str(class);
    }
    out
}

/// Value of `name` on `element`, or [`ScrapeError::MissingAttribute`].
pub fn require_attr<'a>(element: &ElementRef<'a>, name: &str) -> Result<&'a str> {
    match element.value().attr(name) {
        Some(value) => Ok(value),
        None => {
            let trace = trace(element);
            error!(action = "locate", component = "tag_locator", attr = name, trace = %trace, "Attribute missing");
            Err(ScrapeError::MissingAttribute {
                tag: element.value().name().to_string(),
                attr: name.to_string(),
                trace,
            }
            .into())
        }
    }
}

/// All text under `element`, concatenated.
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect()
}
