/// Decodes the body of an HTML entity (`amp`, `Eacute`, `#39`, `#x2014`, ...).
///
/// Letter entities are case-sensitive since case picks the letter; the
/// punctuation ones are matched in any case.
pub fn decode_entity(entity: &str) -> Option<char> {
    decode_letter_entity(entity)
        .or_else(|| decode_symbol_entity(&entity.to_ascii_lowercase()))
        .or_else(|| decode_numeric_entity(entity))
}

fn decode_letter_entity(entity: &str) -> Option<char> {
    let c = match entity {
        "aacute" => 'á',
        "Aacute" => 'Á',
        "eacute" => 'é',
        "Eacute" => 'É',
        "iacute" => 'í',
        "Iacute" => 'Í',
        "oacute" => 'ó',
        "Oacute" => 'Ó',
        "uacute" => 'ú',
        "Uacute" => 'Ú',
        "atilde" => 'ã',
        "Atilde" => 'Ã',
        "otilde" => 'õ',
        "Otilde" => 'Õ',
        "acirc" => 'â',
        "Acirc" => 'Â',
        "ecirc" => 'ê',
        "Ecirc" => 'Ê',
        "ocirc" => 'ô',
        "Ocirc" => 'Ô',
        "agrave" => 'à',
        "Agrave" => 'À',
        "ccedil" => 'ç',
        "Ccedil" => 'Ç',
        "ntilde" => 'ñ',
        "Ntilde" => 'Ñ',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        _ => return None,
    };
    Some(c)
}

fn decode_symbol_entity(lowercase: &str) -> Option<char> {
    let c = match lowercase {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '«',
        "raquo" => '»',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "iexcl" => '¡',
        "iquest" => '¿',
        _ => return None,
    };
    Some(c)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let value = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}

/// Replaces every decodable `&...;` in `text`; unknown ones are kept as is.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| decode_entity(&after[..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Escapes text for use inside HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(decode_entity("amp"), Some('&'));
        assert_eq!(decode_entity("NBSP"), Some(' '));
        assert_eq!(decode_entity("ccedil"), Some('ç'));
        assert_eq!(decode_entity("bogus"), None);
    }

    #[test]
    fn test_letter_entities_keep_case() {
        assert_eq!(decode_entity("Eacute"), Some('É'));
        assert_eq!(decode_entity("Ccedil"), Some('Ç'));
        assert_eq!(decode_entity("Atilde"), Some('Ã'));
        assert_eq!(decode_entity("atilde"), Some('ã'));
        assert_eq!(decode_entity("EACUTE"), None);
        assert_eq!(decode_entities("&Eacute;ramos &Agrave; vista"), "Éramos À vista");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entity("#39"), Some('\''));
        assert_eq!(decode_entity("#x41"), Some('A'));
        assert_eq!(decode_entity("#"), None);
        assert_eq!(decode_entity("#xZZ"), None);
    }

    #[test]
    fn test_decode_entities_in_text() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(decode_entities("AT&T &unknown; x"), "AT&T &unknown; x");
        assert_eq!(decode_entities("trailing &"), "trailing &");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
    }
}
