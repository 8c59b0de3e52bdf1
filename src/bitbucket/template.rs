//! RFC 6570 level-1 URI template expansion.
//!
//! Only simple string expansion (`{var}`) is supported, which is all the
//! Bitbucket endpoint templates use. Expanded values are percent-encoded;
//! literal template text passes through untouched.

use std::fmt::{Display, Write as _};

use super::error::ApiError;

/// Ordered variable set for template expansion.
///
/// Variables are looked up by name; setting the same name twice keeps the
/// latest value.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    vars: Vec<(String, String)>,
}

impl TemplateVars {
    /// Creates an empty variable set.
    #[must_use]
    pub const fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Sets a variable, replacing any earlier value with the same name.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Display) -> Self {
        let name = name.into();
        let rendered = value.to_string();
        if let Some(slot) = self.vars.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = rendered;
        } else {
            self.vars.push((name, rendered));
        }
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Expands `{name}` expressions in `template` against `vars`.
///
/// # Errors
///
/// Returns `ApiError::Template` when an expression names a variable that was
/// not supplied, or when a `{` is never closed.
pub(crate) fn expand(template: &str, vars: &TemplateVars) -> Result<String, ApiError> {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(character) = chars.next() {
        if character != '{' {
            output.push(character);
            continue;
        }

        let mut name = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(inner) => name.push(inner),
                None => {
                    return Err(ApiError::Template {
                        message: format!("unterminated expression in template '{template}'"),
                    });
                }
            }
        }

        let value = vars.get(&name).ok_or_else(|| ApiError::Template {
            message: format!("unresolved template variable '{name}'"),
        })?;
        encode_into(&mut output, value);
    }

    Ok(output)
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_into(output: &mut String, value: &str) {
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                output.push(char::from(byte));
            }
            other => {
                let _ignored = write!(output, "%{other:02X}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{TemplateVars, expand};
    use crate::bitbucket::error::ApiError;

    #[rstest]
    #[case("pullrequests/{id}/comments", 7, "pullrequests/7/comments")]
    #[case("{id}", 123, "123")]
    #[case("no-variables", 0, "no-variables")]
    fn expands_simple_expressions(
        #[case] template: &str,
        #[case] id: u64,
        #[case] expected: &str,
    ) {
        let vars = TemplateVars::new().set("id", id);
        let expanded = expand(template, &vars).expect("expansion should succeed");
        assert_eq!(expanded, expected);
    }

    #[test]
    fn expands_each_variable_exactly_once() {
        let vars = TemplateVars::new()
            .set("account", "team")
            .set("repository", "widget");
        let expanded = expand("repositories/{account}/{repository}/", &vars)
            .expect("expansion should succeed");
        assert_eq!(expanded, "repositories/team/widget/");
    }

    #[rstest]
    #[case("space name", "space%20name")]
    #[case("a/b", "a%2Fb")]
    #[case("tilde~dot.", "tilde~dot.")]
    #[case("caf\u{e9}", "caf%C3%A9")]
    fn percent_encodes_values(#[case] value: &str, #[case] expected: &str) {
        let vars = TemplateVars::new().set("v", value);
        let expanded = expand("{v}", &vars).expect("expansion should succeed");
        assert_eq!(expanded, expected);
    }

    #[test]
    fn unresolved_variable_is_an_error() {
        let error =
            expand("pullrequests/{id}/comments", &TemplateVars::new()).expect_err("should fail");
        assert!(matches!(error, ApiError::Template { .. }));
    }

    #[test]
    fn unterminated_expression_is_an_error() {
        let vars = TemplateVars::new().set("id", 1);
        let error = expand("pullrequests/{id", &vars).expect_err("should fail");
        assert!(matches!(error, ApiError::Template { .. }));
    }

    #[test]
    fn later_set_replaces_earlier_value() {
        let vars = TemplateVars::new().set("id", 1).set("id", 2);
        let expanded = expand("{id}", &vars).expect("expansion should succeed");
        assert_eq!(expanded, "2");
    }
}
