//! Text normalization helpers shared by the analyzer and reporting code.

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Normalize review text for display and word statistics.
///
/// Missing text becomes `""`. Otherwise the text is lowercased, every
/// character that is not an ASCII letter or whitespace is removed (digits,
/// punctuation and emoji included), and whitespace runs collapse to a single
/// space with the ends trimmed. The result is a fixed point of this function.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(text) => normalize_str(text),
        None => String::new(),
    }
}

/// [`normalize`] for text that is known to be present.
pub fn normalize_str(text: &str) -> String {
    let letters: String = text
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_alphabetic() || ch.is_whitespace())
        .collect();
    normalize_inline_whitespace(letters)
}

/// Whether the text has nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_whitespace_collapses_runs() {
        let input = "Alpha\n\n  Beta\tGamma";
        assert_eq!(normalize_inline_whitespace(input), "Alpha Beta Gamma");
    }

    #[test]
    fn normalize_handles_missing_and_empty_text() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some(" \t\n")), "");
    }

    #[test]
    fn normalize_strips_digits_punctuation_and_emoji() {
        assert_eq!(
            normalize(Some("CS225 was GREAT!!! 10/10 😊  would   take again.")),
            "cs was great would take again"
        );
        assert_eq!(normalize(Some("Café-au-lait")), "cafaulait");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "The exam was hard, and the homework was TOUGH!",
            "  multiple\n\nlines\twith  tabs ",
            "Ünïcödé letters & symbols #42",
            "",
        ];
        for sample in samples {
            let once = normalize(Some(sample));
            assert_eq!(normalize(Some(&once)), once, "sample: {sample:?}");
        }
    }
}
