//! Serializer – turns [`ConvertOptions`] into the argument string handed to
//! the renderer process.
//!
//! Output grammar, in order:
//! 1. margin flags (`-T`, `-B`, `-L`, `-R`), each followed by an integer;
//! 2. the remaining tagged fields in table order, where a switch is a bare
//!    flag, an integer or keyword follows its flag unquoted, text and real
//!    numbers follow their flag in double quotes with `"` escaped as `\"`,
//!    and each map entry repeats `<flag> <key> <value>`.
//!
//! Tokens are separated by a single space. Serialization never fails and
//! does not validate values; see [`ConvertOptions::validate`] for that.

use log::debug;

use crate::flags::FlagSet;
use crate::options::ConvertOptions;

/// Ordered token list for `options`, margins first.
pub fn to_tokens(options: &ConvertOptions) -> Vec<String> {
    let mut tokens = Vec::new();
    options.margins.push_flags(&mut tokens);
    options.push_flags(&mut tokens);
    debug!("serialized conversion options into {} tokens", tokens.len());
    tokens
}

/// The full argument string for `options`.
pub fn to_args(options: &ConvertOptions) -> String {
    join_args(&to_tokens(options))
}

/// Join tokens with single spaces. Empty tokens are dropped so no doubled
/// separators appear, and the result carries no outer whitespace.
pub fn join_args<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut args = String::new();
    for token in tokens {
        let token: &str = token.as_ref();
        if token.is_empty() {
            continue;
        }
        if !args.is_empty() {
            args.push(' ');
        }
        args.push_str(token);
    }
    args.trim().to_string()
}
