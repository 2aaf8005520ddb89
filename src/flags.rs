//! Flag tagging – the static association between option fields and the
//! command-line flags understood by the external renderer.
//!
//! Every option record implements [`FlagSet`] by declaring a constant table
//! of [`OptionFlag`] rows. Each row pairs a flag spelling with an accessor
//! that classifies the field's current value as a [`FlagValue`]. Rows are
//! visited in table order, so the table *is* the output order.

use std::borrow::Cow;

use indexmap::IndexMap;

/// The value of one tagged field, classified by how it is written out.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue<'a> {
    /// Repeatable key/value option: `<flag> <key> <value>` once per entry,
    /// in insertion order. An empty map writes nothing.
    Map(&'a IndexMap<String, String>),
    /// Bare flag, written only when `true`.
    Switch(bool),
    /// Integer argument, written unquoted in base 10.
    Int(Option<i64>),
    /// Enumerated keyword, written unquoted.
    Keyword(Option<&'static str>),
    /// Free text or real number, always quoted with embedded quotes escaped.
    Text(Option<Cow<'a, str>>),
}

impl<'a> FlagValue<'a> {
    /// Classify an optional string field.
    pub fn text(value: &'a Option<String>) -> Self {
        FlagValue::Text(value.as_deref().map(Cow::Borrowed))
    }

    /// Classify an optional real-valued field.
    ///
    /// `f64`'s `Display` never uses locale separators or exponent notation,
    /// so `210.0` becomes `210` and `0.5` becomes `0.5`. Non-finite values
    /// are spelled `Infinity`, `-Infinity` and `NaN`.
    pub fn real(value: Option<f64>) -> Self {
        FlagValue::Text(value.map(|v| Cow::Owned(format_real(v))))
    }

    /// Classify an optional integer field.
    pub fn int(value: Option<i32>) -> Self {
        FlagValue::Int(value.map(i64::from))
    }

    /// True when this value writes no tokens at all.
    pub fn is_absent(&self) -> bool {
        match self {
            FlagValue::Map(entries) => entries.is_empty(),
            FlagValue::Switch(on) => !on,
            FlagValue::Int(v) => v.is_none(),
            FlagValue::Keyword(v) => v.is_none(),
            FlagValue::Text(v) => v.is_none(),
        }
    }

    /// Append the tokens for this value under `flag` to `out`.
    pub fn push_tokens(&self, flag: &str, out: &mut Vec<String>) {
        match self {
            FlagValue::Map(entries) => {
                for (key, value) in entries.iter() {
                    out.push(flag.to_string());
                    out.push(key.clone());
                    out.push(value.clone());
                }
            }
            FlagValue::Switch(true) => out.push(flag.to_string()),
            FlagValue::Int(Some(n)) => {
                out.push(flag.to_string());
                out.push(n.to_string());
            }
            FlagValue::Keyword(Some(word)) => {
                out.push(flag.to_string());
                out.push((*word).to_string());
            }
            FlagValue::Text(Some(text)) => {
                out.push(flag.to_string());
                out.push(quote(text));
            }
            FlagValue::Switch(false)
            | FlagValue::Int(None)
            | FlagValue::Keyword(None)
            | FlagValue::Text(None) => {}
        }
    }
}

/// One row of a flag table: a flag spelling and the accessor for its field.
pub struct OptionFlag<T> {
    pub flag: &'static str,
    pub value: fn(&T) -> FlagValue<'_>,
}

/// A record whose fields are tagged with renderer flags.
pub trait FlagSet: Sized + 'static {
    /// Tagged fields in output order.
    const FLAGS: &'static [OptionFlag<Self>];

    /// Append the tokens of every present field, in table order.
    fn push_flags(&self, out: &mut Vec<String>) {
        for row in Self::FLAGS {
            (row.value)(self).push_tokens(row.flag, out);
        }
    }

    /// Flags that would currently be written, in table order.
    fn present_flags(&self) -> Vec<&'static str> {
        Self::FLAGS
            .iter()
            .filter(|row| !(row.value)(self).is_absent())
            .map(|row| row.flag)
            .collect()
    }
}

fn format_real(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        v.to_string()
    }
}

/// Wrap `value` in double quotes, escaping embedded double quotes with a
/// backslash. Backslashes themselves are passed through untouched.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
