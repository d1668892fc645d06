//! Placeholder substitution for templated files
//!
//! Templated files use `{{key}}` placeholders. There is no escape syntax:
//! files that legitimately contain `{{` (e.g. Handlebars views in the
//! payload) must be listed as raw in the render rules.

use anyhow::{bail, Result};
use std::collections::HashMap;

/// Key-value mapping applied to templated files.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
    values: HashMap<String, String>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a placeholder key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Replace every `{{key}}` placeholder in `input` with its mapped value.
///
/// Unknown and unterminated placeholders are errors so that payload typos
/// surface at generation time instead of shipping broken files.
pub fn render_str(input: &str, vars: &Substitutions) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            bail!("Unterminated placeholder near `{}`", snippet(&rest[start..]));
        };

        let key = after_open[..end].trim();
        if key.is_empty() {
            bail!("Empty placeholder `{{{{}}}}` in template");
        }

        match vars.get(key) {
            Some(value) => output.push_str(value),
            None => bail!("Unknown placeholder `{{{{{}}}}}`", key),
        }

        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Short excerpt for error messages
fn snippet(s: &str) -> &str {
    let max = 24.min(s.len());
    // Back off to a char boundary
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
