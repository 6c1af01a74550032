//! Positional element paths in the `/html/body/div[1]/p` style.
//!
//! Only child steps are supported: a tag name with an optional 1-based
//! index among same-named siblings. A step without an index matches every
//! same-named child, which is how repeated blocks are addressed.

use std::str::FromStr;
use scraper::{ElementRef, Html};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    tag: String,
    position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
    absolute: bool,
    steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid element path: {0}")]
pub struct PathSyntaxError(String);

impl FromStr for ElementPath {
    type Err = PathSyntaxError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (absolute, rest) = match raw.strip_prefix("./") {
            Some(rest) => (false, rest),
            None => match raw.strip_prefix('/') {
                Some(rest) => (true, rest),
                None => (false, raw),
            },
        };

        let steps = rest
            .split('/')
            .map(|segment| parse_step(segment).ok_or_else(|| PathSyntaxError(raw.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ElementPath { absolute, steps })
    }
}

fn parse_step(segment: &str) -> Option<Step> {
    let (tag, position) = match segment.split_once('[') {
        Some((tag, index)) => {
            let n = index.strip_suffix(']')?.parse::<usize>().ok()?;
            if n == 0 {
                return None;
            }
            (tag, Some(n))
        }
        None => (segment, None),
    };
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(Step {
        tag: tag.to_ascii_lowercase(),
        position,
    })
}

impl ElementPath {
    /// Evaluate an absolute path from the document root.
    ///
    /// A relative path is evaluated from the root element instead.
    pub fn select_document<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let root = document.root_element();
        if !self.absolute {
            return self.select(root);
        }

        let Some((first, rest)) = self.steps.split_first() else {
            return Vec::new();
        };
        if root.value().name() != first.tag || first.position.is_some_and(|n| n != 1) {
            return Vec::new();
        }
        walk(vec![root], rest)
    }

    /// Evaluate relative to `context`. Results are in document order.
    pub fn select<'a>(&self, context: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        walk(vec![context], &self.steps)
    }

    pub fn first<'a>(&self, context: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.select(context).into_iter().next()
    }
}

fn walk<'a>(mut nodes: Vec<ElementRef<'a>>, steps: &[Step]) -> Vec<ElementRef<'a>> {
    for step in steps {
        nodes = nodes
            .into_iter()
            .flat_map(|node| matching_children(node, step))
            .collect();
        if nodes.is_empty() {
            break;
        }
    }
    nodes
}

fn matching_children<'a>(node: ElementRef<'a>, step: &Step) -> Vec<ElementRef<'a>> {
    let mut named = node
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == step.tag);
    match step.position {
        Some(n) => named.nth(n - 1).into_iter().collect(),
        None => named.collect(),
    }
}

/// First non-blank text node directly under `element`, trimmed.
pub fn own_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|text| text.trim().to_string()))
        .find(|text| !text.is_empty())
}

/// All descendant text with each piece trimmed and joined without separators.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
