//! Entity reference resolution.
//!
//! ENML is XHTML-derived, so besides the five XML entities and numeric
//! character references a note may use the common named HTML entities
//! (`&nbsp;`, `&mdash;`, ...). These arrive from the reader as separate
//! reference events and are turned back into text here.

/// Resolve the body of an entity reference (the part between `&` and `;`).
///
/// Returns `None` for names this module does not know.
pub(crate) fn resolve_entity(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return value.and_then(char::from_u32).map(String::from);
    }

    xml_entity(name)
        .or_else(|| html_entity(name))
        .map(str::to_owned)
}

/// Resolve a reference, keeping unknown ones as literal `&name;` text.
pub(crate) fn resolve_or_literal(name: &str) -> String {
    resolve_entity(name).unwrap_or_else(|| format!("&{name};"))
}

/// Replace every `&name;` reference in `raw` with its resolved text.
///
/// Used for attribute values that the reader refuses to unescape because
/// they contain HTML-only entities.
pub(crate) fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match tail.find(';') {
            Some(semi) => {
                out.push_str(&resolve_or_literal(&tail[..semi]));
                rest = &tail[semi + 1..];
            }
            None => {
                out.push_str(&rest[amp..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn xml_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        _ => return None,
    })
}

fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",

        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",

        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",

        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",

        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        "deg" => "\u{00b0}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "middot" => "\u{00b7}",
        "iexcl" => "\u{00a1}",
        "iquest" => "\u{00bf}",

        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",
        _ => return None,
    })
}
