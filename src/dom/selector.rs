use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::error::GarlicError;

// ============================================================================
// Selector subset: comma-separated compound selectors without combinators.
//   tag, *, #id, .class, [attr], [attr=value], [attr="value"]
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub alternatives: Vec<Compound>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrMatch {
    pub name: String,
    pub value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, GarlicError> {
        let alternatives = input
            .split(',')
            .map(|part| parse_compound(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        if alternatives.is_empty() {
            return Err(GarlicError::Selector(format!("empty selector '{}'", input)));
        }

        Ok(Selector { alternatives })
    }

    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(node) = doc.node(id) else {
            return false;
        };

        self.alternatives.iter().any(|c| {
            let tag_ok = c.tag.as_deref().map_or(true, |t| t == node.tag);
            let id_ok = c.id.as_deref().map_or(true, |i| node.attr("id") == Some(i));
            let class_ok = c.classes.iter().all(|class| {
                node.attr("class")
                    .map(|list| list.split_whitespace().any(|token| token == class))
                    .unwrap_or(false)
            });
            let attrs_ok = c.attrs.iter().all(|a| match (&a.value, node.attr(&a.name)) {
                (None, found) => found.is_some(),
                (Some(expected), Some(found)) => expected == found,
                (Some(_), None) => false,
            });

            tag_ok && id_ok && class_ok && attrs_ok
        })
    }
}

fn parse_compound(input: &str) -> Result<Compound, GarlicError> {
    if input.is_empty() {
        return Err(GarlicError::Selector("empty compound selector".into()));
    }
    if input.contains(|c: char| c.is_whitespace() || c == '>' || c == '+' || c == '~') {
        return Err(GarlicError::Selector(format!(
            "combinators are not supported: '{}'",
            input
        )));
    }

    let mut compound = Compound::default();
    let mut rest = input;

    let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
    let tag = &rest[..tag_end];
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(tag.to_lowercase());
    }
    rest = &rest[tag_end..];

    while let Some(first) = rest.chars().next() {
        match first {
            '#' | '.' => {
                let end = rest[1..]
                    .find(['#', '.', '['])
                    .map(|i| i + 1)
                    .unwrap_or(rest.len());
                let ident = &rest[1..end];
                if ident.is_empty() {
                    return Err(GarlicError::Selector(format!("missing name after '{}'", first)));
                }
                if first == '#' {
                    compound.id = Some(ident.to_string());
                } else {
                    compound.classes.push(ident.to_string());
                }
                rest = &rest[end..];
            }
            '[' => {
                let close = rest
                    .find(']')
                    .ok_or_else(|| GarlicError::Selector(format!("unclosed '[' in '{}'", input)))?;
                compound.attrs.push(parse_attr(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            other => {
                return Err(GarlicError::Selector(format!(
                    "unexpected '{}' in '{}'",
                    other, input
                )));
            }
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str) -> Result<AttrMatch, GarlicError> {
    match body.split_once('=') {
        None => {
            let name = body.trim();
            if name.is_empty() {
                return Err(GarlicError::Selector("empty attribute name".into()));
            }
            Ok(AttrMatch {
                name: name.to_lowercase(),
                value: None,
            })
        }
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(GarlicError::Selector("empty attribute name".into()));
            }
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            Ok(AttrMatch {
                name: name.to_lowercase(),
                value: Some(value.to_string()),
            })
        }
    }
}
