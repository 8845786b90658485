//! Turns the BLCMM markup at the start of a file into well formed XML.
//!
//! BLCMM writes the contents of `<comment>` and `<code>` elements without escaping them, so a
//! single `set Foo Bar (Baz=<qux>)` line would break any XML parser. Those element bodies are
//! escaped here, along with any stray `&` in the rest of the markup.
//!
//! A BLCMM file may carry plain commands after its closing `</BLCMM>` tag (for compatibility with
//! FilterTool). Normalizing stops on the line holding that tag, leaving the rest of the source
//! unread.

use std::io::BufRead;

use tracing::{instrument, trace};

use crate::error::{Error, Result};
use crate::source::LineSource;
use crate::text::CiStr;

/// Elements whose contents BLCMM writes verbatim
const RAW_ELEMENTS: [&str; 2] = ["comment", "code"];

const ROOT_CLOSE: &str = "</BLCMM";

enum State {
    Markup,
    Raw(&'static str),
}

/// Reads the BLCMM document from the source, up to and including the line with `</BLCMM>`.
#[instrument(skip_all, err)]
pub fn normalize<R: BufRead>(source: &mut LineSource<R>) -> Result<String> {
    let mut output = String::new();
    let mut state = State::Markup;

    while let Some(line) = source.next_line()? {
        let finished = normalize_line(&line, &mut state, &mut output)
            .map_err(|msg| Error::PreprocessError(format!("line {}: {msg}", source.line_number())))?;
        output.push('\n');

        if finished {
            trace!(lines = source.line_number(), "found end of BLCMM document");
            return Ok(output);
        }
    }

    Err(Error::PreprocessError(match state {
        State::Raw(name) => format!("Unexpected end of file inside <{name}> element"),
        State::Markup => "Unexpected end of file before closing </BLCMM> tag".into(),
    }))
}

/// Normalizes a single line, returning true once the root element has been closed.
fn normalize_line(
    line: &str,
    state: &mut State,
    output: &mut String,
) -> core::result::Result<bool, String> {
    let mut rest = line;
    loop {
        match *state {
            State::Raw(name) => {
                let close = format!("</{name}>");
                let Some(idx) = CiStr::new(rest).find(&close) else {
                    escape_text(rest, output);
                    return Ok(false);
                };

                escape_text(&rest[..idx], output);
                rest = &rest[idx..];
                *state = State::Markup;
            }
            State::Markup => {
                let Some(start) = rest.find('<') else {
                    escape_markup(rest, output);
                    return Ok(false);
                };
                escape_markup(&rest[..start], output);
                rest = &rest[start..];

                let end = rest.find('>').ok_or("unterminated tag")?;
                let tag = &rest[..=end];
                rest = &rest[end + 1..];

                escape_markup(tag, output);
                if CiStr::new(tag).starts_with(ROOT_CLOSE) {
                    return Ok(true);
                }
                if let Some(name) = raw_element(tag) {
                    *state = State::Raw(name);
                }
            }
        }
    }
}

/// If this is the opening tag of an element BLCMM doesn't escape, get its name.
fn raw_element(tag: &str) -> Option<&'static str> {
    if tag.ends_with("/>") {
        return None;
    }

    let name = tag
        .strip_prefix('<')?
        .split(|chr: char| chr.is_ascii_whitespace() || chr == '>' || chr == '/')
        .next()?;
    RAW_ELEMENTS
        .into_iter()
        .find(|raw| CiStr::new(name) == *raw)
}

fn escape_text(text: &str, output: &mut String) {
    for chr in text.chars() {
        match chr {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(chr),
        }
    }
}

/// Escapes any `&` which doesn't start an entity reference.
fn escape_markup(markup: &str, output: &mut String) {
    let mut pieces = markup.split('&');
    if let Some(first) = pieces.next() {
        output.push_str(first);
    }
    for piece in pieces {
        output.push_str(if starts_with_entity(piece) { "&" } else { "&amp;" });
        output.push_str(piece);
    }
}

fn starts_with_entity(text: &str) -> bool {
    let Some(end) = text.find(';') else {
        return false;
    };
    let name = &text[..end];
    match name.strip_prefix('#') {
        Some(code) => match code.strip_prefix('x') {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()),
        },
        None => !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}
