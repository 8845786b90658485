//! Extraction for BLCMM mod files.
//!
//! BLCMM files are (almost) XML documents:
//!
//! ```xml
//! <BLCMM v="1">
//!     <head>
//!         <type name="BL2"/>
//!         <profiles><profile name="default" current="true"/></profiles>
//!     </head>
//!     <body>
//!         <category name="My Mod">
//!             <comment>A description line</comment>
//!             <category name="Description">
//!                 <comment>@title My Mod</comment>
//!             </category>
//!             <code profiles="default">set Foo Bar 1</code>
//!         </category>
//!     </body>
//! </BLCMM>
//! ```
//!
//! The description is made of the comments at the start of the root category. A nested category
//! with "description" in its name replaces anything before it.

pub mod preprocess;
pub mod tree;

use std::io::BufRead;

use tracing::{debug, instrument};

use crate::command::is_command;
use crate::error::{Error, Result};
use crate::result::ParseResult;
use crate::source::LineSource;
use crate::text::CiStr;

use tree::{Document, Element, Node};

/// The only `v` attribute value understood on the `<BLCMM>` root
pub const SUPPORTED_VERSION: &str = "1";

/// Parses through a BLCMM file.
///
/// Leaves the source directly after the line with the closing `</BLCMM>` tag.
#[instrument(skip_all, err)]
pub fn parse_blcmm<R: BufRead>(
    source: &mut LineSource<R>,
    result: &mut ParseResult,
) -> Result<()> {
    let xml = preprocess::normalize(source)?;
    let doc = Document::parse(&xml)?;

    if let Some(game) = recommended_game(&doc) {
        debug!(game, "found recommended game");
        result.game = Some(game.to_owned());
    }

    extract_description(&doc, result)
}

/// Gets the first non-empty `/BLCMM/head/type/@name`
fn recommended_game(doc: &Document) -> Option<&str> {
    doc.root()
        .filter(|root| root.name == "BLCMM")?
        .elements_named("head")
        .flat_map(|head| head.elements_named("type"))
        .find_map(|kind| kind.attribute("name"))
        .filter(|name| !name.is_empty())
}

fn is_comment(node: &Node) -> bool {
    matches!(node, Node::Element(element) if CiStr::new(&element.name) == "comment")
}

/// Adds a comment node's text to the result, unless it's really holding a command.
///
/// Returns false if the description has ended.
fn add_comment(comment: &Element, result: &mut ParseResult) -> bool {
    let value = comment.text();
    if is_command(value, false) {
        debug!(value, "comment holds a command, description's over");
        return false;
    }
    result.add_comment(value);
    true
}

fn extract_description(doc: &Document, result: &mut ParseResult) -> Result<()> {
    let root = doc.root().filter(|root| root.name == "BLCMM");

    let version = root
        .and_then(|root| root.attribute("v"))
        .unwrap_or_default();
    if version != SUPPORTED_VERSION {
        return Err(Error::DocumentMalformed("Unknown BLCMM file version".into()));
    }

    let category = root
        .into_iter()
        .flat_map(|root| root.elements_named("body"))
        .flat_map(|body| body.elements_named("category"))
        .next()
        .ok_or_else(|| Error::DocumentMalformed("Couldn't find root category".into()))?;

    for child in &category.children {
        let Node::Element(element) = child else {
            break;
        };

        if is_comment(child) {
            if !add_comment(element, result) {
                break;
            }
            continue;
        }

        if CiStr::new(&element.name) == "category" {
            let name = element.attribute("name").unwrap_or_default();
            if !CiStr::new(name).contains("description") {
                debug!(category = name, "description's over");
                break;
            }

            // Discard existing comments, and get them from this category's children instead
            debug!(category = name, "found dedicated description category");
            result.reset();

            // Unlike the outer level, nested comment names are matched case sensitively
            for grandchild in &element.children {
                let Node::Element(comment) = grandchild else {
                    break;
                };
                if comment.name != "comment" || !add_comment(comment, result) {
                    break;
                }
            }
        }

        // After any non-comment, the description's over
        break;
    }

    Ok(())
}
