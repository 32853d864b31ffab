//! Decoding helpers for the free-text fields sent by the API.
//!
//! Every string is percent-encoded as UTF-8 and then has HTML entities
//! applied on top, so decoding runs in the opposite order: percent first,
//! entities second.

use percent_encoding::percent_decode_str;
use scraper::Html;
use std::borrow::Cow;

/// Named references HTML parsers still accept without the closing `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Length of `#123` / `#x7b` at the start of `body` (after the `#`), if it names a usable character.
fn numeric_reference_len(body: &str) -> usize {
    let (digits, radix, marker) = match body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        Some(hex) => (hex, 16, 1),
        None => (body, 10, 0),
    };
    let len = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let decodes = u32::from_str_radix(&digits[..len], radix)
        .ok()
        .and_then(char::from_u32)
        .map_or(false, |c| c >= ' ' || matches!(c, '\t' | '\n' | '\u{000C}' | '\r'));

    if len > 0 && decodes {
        marker + len
    } else {
        0
    }
}

/// Length of the character reference starting right after an `&`, or zero.
fn reference_len(rest: &str) -> usize {
    if let Some(numeric) = rest.strip_prefix('#') {
        return match numeric_reference_len(numeric) {
            0 => 0,
            len => len + 1,
        };
    }

    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if rest[name_len..].starts_with(';') {
        return 0;
    }

    let name = &rest[..name_len];
    LEGACY_ENTITIES
        .iter()
        .filter(|legacy| name.starts_with(*legacy))
        .map(|legacy| legacy.len())
        .max()
        .unwrap_or(0)
}

/// Adds the missing `;` to references such as `&amp ` or `&#39`.
fn terminate_legacy_references(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut pieces = s.split('&');
    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(pieces.next().unwrap_or_default());
    for piece in pieces {
        out.push('&');
        let len = reference_len(piece);
        out.push_str(&piece[..len]);
        if len > 0 && !piece[len..].starts_with(';') {
            out.push(';');
        }
        out.push_str(&piece[len..]);
    }
    Cow::Owned(out)
}

/// Reverses the API's text encoding. Malformed sequences pass through unchanged.
pub fn unescape(s: &str) -> String {
    let decoded = percent_decode_str(s).decode_utf8_lossy();
    let terminated = terminate_legacy_references(&decoded);
    html_escape::decode_html_entities(&terminated).into_owned()
}

/// Plain text of an HTML fragment, in reading order.
pub fn extract_html_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}
