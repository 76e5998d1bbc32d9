//! Response decoding
//!
//! WeMo replies come in three flavours:
//!
//! - plain XML documents (`setup.xml`), decoded with serde after namespace
//!   prefixes are stripped ([`parse`]);
//! - SOAP bodies whose payload is a second, entity-escaped XML document
//!   (bridge end-device lists, bulb status), which must be unescaped as a
//!   whole before decoding ([`parse_nested`]);
//! - single tags scraped out of the body with a pattern, see [`pattern`].

pub mod pattern;

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};

/// Parse an XML string into a deserializable type with namespace stripping
///
/// Elements absent from the document fall back to the type's serde defaults;
/// a malformed document is an [`ApiError::Decode`].
pub fn parse<T: DeserializeOwned>(xml: &str) -> Result<T> {
    let stripped = strip_namespaces(xml);
    quick_xml::de::from_str(&stripped).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Unescape the whole body, then parse the nested document it carries
///
/// The bridge service returns its payload as escaped text inside a SOAP
/// element. After unescaping, the inner document sits in the tree as real
/// elements. If the payload was not escaped exactly once it stays text and the
/// nested fields decode to their defaults.
pub fn parse_nested<T: DeserializeOwned>(body: &str) -> Result<T> {
    parse(&unescape_html(body))
}

/// Replace HTML character references (`&lt;`, `&quot;`, `&#39;`, `&nbsp;` ...)
///
/// Unknown references are left as they are.
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

/// Strip namespace prefixes from XML content to simplify parsing
///
/// `<s:Envelope xmlns:s="..."><s:Body>` becomes `<Envelope><Body>`; `xmlns`
/// declarations are dropped, other attributes keep their local name.
pub fn strip_namespaces(xml: &str) -> String {
    let mut result = String::with_capacity(xml.len());
    let mut chars = xml.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            result.push(c);
            continue;
        }
        result.push(c);

        if let Some(slash) = chars.next_if_eq(&'/') {
            result.push(slash);
        }

        // Declarations, processing instructions and comments are copied as-is
        if matches!(chars.peek(), Some('?') | Some('!')) {
            for ch in chars.by_ref() {
                result.push(ch);
                if ch == '>' {
                    break;
                }
            }
            continue;
        }

        let tag_name = take_name(&mut chars);
        result.push_str(local_name(&tag_name));

        // Attributes up to the end of the tag
        while let Some(&ch) = chars.peek() {
            if ch == '>' {
                result.push(ch);
                chars.next();
                break;
            }
            if ch == '/' || ch.is_whitespace() {
                result.push(ch);
                chars.next();
                continue;
            }

            let attr_name = take_name(&mut chars);
            let keep = !attr_name.starts_with("xmlns");
            if keep {
                result.push_str(local_name(&attr_name));
            }

            // '=' and the quoted value
            if let Some(eq) = chars.next_if_eq(&'=') {
                if keep {
                    result.push(eq);
                }
                if let Some(quote) = chars.next_if(|q| *q == '"' || *q == '\'') {
                    if keep {
                        result.push(quote);
                    }
                    for ch in chars.by_ref() {
                        if keep {
                            result.push(ch);
                        }
                        if ch == quote {
                            break;
                        }
                    }
                }
            }
        }
    }

    result
}

fn take_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(ch) = chars.next_if(|ch| !(ch.is_whitespace() || matches!(ch, '>' | '/' | '='))) {
        name.push(ch);
    }
    name
}

fn local_name(name: &str) -> &str {
    match name.find(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}
