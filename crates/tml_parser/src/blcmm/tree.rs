//! A minimal element tree over a normalized BLCMM document.
//!
//! Only what the description extractor needs is kept: element names, attributes, and text.
//! Whitespace-only text, XML comments, processing instructions and declarations are dropped.

use std::borrow::Cow;
use std::fmt::Display;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::text::trim;

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let attributes = start
            .attributes()
            .map(|attr| {
                let attr = attr.map_err(xml_error)?;
                let value = attr.unescape_value().map_err(xml_error)?;
                Ok((lossy(attr.key.as_ref()), value.into_owned()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Element {
            name: lossy(start.name().as_ref()),
            attributes,
            children: Vec::new(),
        })
    }

    /// Get the value of an attribute. Attribute names are case sensitive.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Iterate over the child elements with the given (case sensitive) name
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// The value of the first text child, or an empty string if there isn't one
    pub fn text(&self) -> &str {
        self.children
            .iter()
            .find_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .unwrap_or_default()
    }
}

/// A parsed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    roots: Vec<Element>,
}

impl Document {
    pub fn parse(xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut roots = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    attach(&mut stack, &mut roots, element);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::PreprocessError("Unexpected closing tag".into()))?;
                    attach(&mut stack, &mut roots, element);
                }
                Event::Text(text) => {
                    push_text(&mut stack, text.unescape().map_err(xml_error)?);
                }
                Event::CData(data) => {
                    push_text(&mut stack, Cow::Owned(lossy(&data.into_inner())));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = stack.last() {
            return Err(Error::PreprocessError(format!(
                "Unclosed element <{}>",
                element.name
            )));
        }

        Ok(Document { roots })
    }

    /// The top level element, if the document has one
    pub fn root(&self) -> Option<&Element> {
        self.roots.first()
    }
}

fn attach(stack: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => roots.push(element),
    }
}

fn push_text(stack: &mut [Element], text: Cow<'_, str>) {
    if trim(&text).is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Text(text.into_owned()));
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn xml_error(err: impl Display) -> Error {
    Error::PreprocessError(err.to_string())
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{Document, Node};
    use crate::error::{Error, Result};

    #[test]
    fn builds_tree() -> Result<()> {
        let doc = Document::parse(
            r#"<BLCMM v="1">
    <head><type name="BL2"/></head>
    <body>
        <category name="Root">
            <comment>Hello &amp; welcome</comment>
            <comment><![CDATA[raw <text>]]></comment>
            <comment/>
        </category>
    </body>
</BLCMM>"#,
        )?;

        let root = doc.root().ok_or(Error::PreprocessError("no root".into()))?;
        assert_eq!(root.name, "BLCMM");
        assert_eq!(root.attribute("v"), Some("1"));
        assert_eq!(root.attribute("V"), None);

        let category = root
            .elements_named("body")
            .flat_map(|body| body.elements_named("category"))
            .next()
            .ok_or(Error::PreprocessError("no category".into()))?;
        assert_eq!(category.attribute("name"), Some("Root"));

        let comments = category.elements().map(|c| c.text()).collect::<Vec<_>>();
        assert_eq!(comments, vec!["Hello & welcome", "raw <text>", ""]);

        Ok(())
    }

    #[test]
    fn whitespace_text_is_dropped() -> Result<()> {
        let doc = Document::parse("<a>\n  <b>  keep  </b>\n</a>")?;

        let root = doc.root().ok_or(Error::PreprocessError("no root".into()))?;
        assert_eq!(root.children.len(), 1);

        let Some(Node::Element(b)) = root.children.first() else {
            panic!("expected an element");
        };
        assert_eq!(b.text(), "  keep  ");

        Ok(())
    }

    #[test]
    fn mismatched_tags_fail() {
        let doc = Document::parse("<a><b></a>");

        assert!(matches!(doc, Err(Error::PreprocessError(_))));
    }

    #[test]
    fn unclosed_tags_fail() {
        let doc = Document::parse("<a><b></b>");

        assert!(matches!(doc, Err(Error::PreprocessError(_))));
    }
}
