/// Normalized words extracted from a free-text medical profile field.
///
/// Order and duplicates of the source text are preserved and empty
/// fragments never appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    /// Splits on commas, semicolons, periods and whitespace runs, then trims and lowercases.
    pub fn parse(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::default();
        };

        let tokens = text
            .split(|c: char| c == ',' || c == ';' || c == '.' || c.is_whitespace())
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_lowercase)
            .collect();

        Self(tokens)
    }

    /// True when any token occurs inside `lowercase_name`.
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.0
            .iter()
            .any(|token| !token.is_empty() && lowercase_name.contains(token.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
