//! Splitting of compound "code + name" cells.

use lazy_regex::{regex, regex_replace_all};

/// Result of splitting a possibly compound cell.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Split {
    /// First maximal run of decimal digits, if any.
    pub code: Option<String>,
    /// The cell with the code removed, whitespace collapsed and trimmed.
    pub text: String,
}

/// Splits `value` into its first run of digits and the remaining text.
///
/// An absent value yields no code and empty text. A value without digits
/// yields no code and the trimmed value.
pub fn split(value: Option<&str>) -> Split {
    let Some(value) = value else {
        return Split::default();
    };

    let Some(m) = regex!(r"[0-9]+").find(value) else {
        return Split {
            code: None,
            text: value.trim().to_string(),
        };
    };

    let mut rest = String::with_capacity(value.len() - m.len());
    rest.push_str(&value[..m.start()]);
    rest.push_str(&value[m.end()..]);

    Split {
        code: Some(m.as_str().to_string()),
        text: regex_replace_all!(r"\s+", rest.trim(), " ").into_owned(),
    }
}
