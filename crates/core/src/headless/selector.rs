//! The CSS selector subset the site uses: type, `#id`, `.class`, `[attr]`,
//! `[attr="v"]`, `[attr^="v"]`, compounds of those, and the descendant
//! combinator.

use super::document::{Document, NodeId};

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Compounds left to right, each a descendant of the previous one.
    parts: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

impl Selector {
    /// Returns `None` for anything outside the supported subset.
    pub fn parse(input: &str) -> Option<Selector> {
        let parts = split_compounds(input)?
            .iter()
            .map(|c| parse_compound(c))
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Selector { parts })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((last, rest)) = self.parts.split_last() else {
            return false;
        };
        if !last.matches(doc, node) {
            return false;
        }

        let mut cursor = doc.parent(node);
        for part in rest.iter().rev() {
            loop {
                let Some(ancestor) = cursor else {
                    return false;
                };
                cursor = doc.parent(ancestor);
                if part.matches(doc, ancestor) {
                    break;
                }
            }
        }
        true
    }
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let n = doc.node(node);
        if let Some(tag) = &self.tag {
            if !n.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if n.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| n.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|a| {
            let value = doc.attribute(node, &a.name);
            match (&a.op, value) {
                (_, None) => false,
                (AttrOp::Exists, Some(_)) => true,
                (AttrOp::Equals(want), Some(v)) => &v == want,
                (AttrOp::Prefix(want), Some(v)) => v.starts_with(want.as_str()),
            }
        })
    }
}

/// Splits on whitespace that is not inside `[...]`.
fn split_compounds(input: &str) -> Option<Vec<String>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"') | (None, '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                depth += 1;
                current.push(ch);
            }
            (None, ']') => {
                depth = depth.checked_sub(1)?;
                current.push(ch);
            }
            (None, c) if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    if !current.is_empty() {
        out.push(current);
    }
    Some(out)
}

fn parse_compound(input: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let (name, end) = ident(&chars, i + 1);
                if name.is_empty() {
                    return None;
                }
                compound.id = Some(name);
                i = end;
            }
            '.' => {
                let (name, end) = ident(&chars, i + 1);
                if name.is_empty() {
                    return None;
                }
                compound.classes.push(name);
                i = end;
            }
            '[' => {
                let close = chars[i..].iter().position(|&c| c == ']')? + i;
                let body: String = chars[i + 1..close].iter().collect();
                compound.attrs.push(parse_attr(&body)?);
                i = close + 1;
            }
            '*' if i == 0 => i += 1,
            _ if i == 0 => {
                let (name, end) = ident(&chars, 0);
                compound.tag = Some(name);
                i = end;
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && !matches!(chars[end], '#' | '.' | '[') {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let unquote = |v: &str| -> String {
        let v = v.trim();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_string()
    };

    if let Some((name, value)) = body.split_once("^=") {
        return Some(AttrMatch {
            name: name.trim().to_string(),
            op: AttrOp::Prefix(unquote(value)),
        });
    }
    if let Some((name, value)) = body.split_once('=') {
        return Some(AttrMatch {
            name: name.trim().to_string(),
            op: AttrOp::Equals(unquote(value)),
        });
    }
    let name = body.trim();
    if name.is_empty() {
        return None;
    }
    Some(AttrMatch {
        name: name.to_string(),
        op: AttrOp::Exists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::document::El;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(1280.0, 800.0);
        let body = doc.body();
        let footer = doc.append(body, El::new("footer"));
        doc.append(footer, El::new("input").attr("type", "email"));
        let button = doc.append(footer, El::new("button").class("btn primary"));
        let anchor = doc.append(body, El::new("a").attr("href", "#menu"));
        (doc, footer, button, anchor)
    }

    #[test]
    fn parses_the_site_selectors() {
        for s in [
            ".fade-in",
            "img[data-src]",
            "a[href^=\"#\"]",
            ".menu-overlay button",
            "footer button",
            "button[type=\"submit\"]",
            "#name",
        ] {
            assert!(Selector::parse(s).is_some(), "{s}");
        }
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("a[href").is_none());
    }

    #[test]
    fn descendant_and_attribute_matching() {
        let (doc, footer, button, anchor) = sample();
        let footer_button = Selector::parse("footer button").unwrap();
        assert!(footer_button.matches(&doc, button));
        assert!(!footer_button.matches(&doc, footer));

        let compound = Selector::parse("button.btn.primary").unwrap();
        assert!(compound.matches(&doc, button));
        assert!(!Selector::parse("button.secondary").unwrap().matches(&doc, button));

        let in_page = Selector::parse("a[href^=\"#\"]").unwrap();
        assert!(in_page.matches(&doc, anchor));
        assert!(!Selector::parse("a[href=\"#other\"]")
            .unwrap()
            .matches(&doc, anchor));
    }
}
