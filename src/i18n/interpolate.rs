//! Parameter interpolation for `{{name}}` placeholders

use std::fmt::Display;

/// Ordered name/value pairs substituted into translated strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing any earlier value with the same name
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(Params::new(), |params, (k, v)| params.with(k, v))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Try to read `{{name}}` at the start of `input`, returning the name and the
/// byte length of the whole placeholder.
fn placeholder_at(input: &str) -> Option<(&str, usize)> {
    let rest = input.strip_prefix("{{")?;
    let name_len = rest
        .char_indices()
        .find(|(_, c)| !is_name_char(*c))
        .map_or(rest.len(), |(i, _)| i);
    if name_len == 0 {
        return None;
    }
    rest[name_len..].starts_with("}}").then(|| (&rest[..name_len], name_len + 4))
}

/// Replace every `{{name}}` with the matching parameter in a single pass.
///
/// Placeholders without a matching parameter are left as-is, and substituted
/// values are never rescanned.
pub fn interpolate(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;

    while cursor < template.len() {
        let rest = &template[cursor..];
        let Some(offset) = rest.find("{{") else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..offset]);
        cursor += offset;

        let rest = &template[cursor..];
        match placeholder_at(rest) {
            Some((name, len)) => {
                match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[..len]),
                }
                cursor += len;
            }
            None => {
                // Not a placeholder: keep one brace and rescan from the next one,
                // so `{{{name}}}` still matches the inner placeholder.
                out.push('{');
                cursor += 1;
            }
        }
    }

    out
}
