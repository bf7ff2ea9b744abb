//! `@@name` variable substitution inside partials.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::profiles::VariableSyntax;

#[allow(clippy::expect_used)]
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@@([A-Za-z_]\w*)\b").expect("variable pattern is valid")
});

/// Directive names that share the `@@` prefix but are not variables.
const DIRECTIVES: &[&str] = &["if", "include"];

/// Replace every `@@name` with the target's echo of `name`.
///
/// `@@if` and `@@include` are left as they are.
#[must_use]
pub fn translate_variables(text: &str, syntax: VariableSyntax) -> String {
    VARIABLE
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            match caps.get(1).map(|m| m.as_str()) {
                Some(name) if !DIRECTIVES.contains(&name) => syntax.render(name),
                _ => whole.to_string(),
            }
        })
        .into_owned()
}
