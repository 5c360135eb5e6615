use crate::domain::token::VersionToken;
use crate::error::{Result, ValidationError};

/// Contents of a project descriptor (`.csproj`) carrying version fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    text: String,
}

impl Descriptor {
    pub fn new(text: impl Into<String>) -> Self {
        Descriptor { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The `<Version>` value, as read by changelog generation.
    ///
    /// Missing markers read as an empty version.
    pub fn version(&self) -> &str {
        VersionToken::VERSION.extract(&self.text).unwrap_or_default()
    }

    /// The value shown to the operator before a bump: the first field present.
    pub fn current_version(&self) -> Result<&str> {
        VersionToken::DESCRIPTOR_FIELDS
            .iter()
            .find_map(|token| token.extract(&self.text))
            .ok_or_else(|| {
                ValidationError::NoVersionField {
                    expected: VersionToken::DESCRIPTOR_FIELDS
                        .iter()
                        .map(|t| t.name())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
                .into()
            })
    }

    /// Returns a copy with every present version field set to `version`.
    ///
    /// Absent fields are skipped; unrelated text is preserved byte for byte.
    pub fn with_version(&self, version: &str) -> Descriptor {
        let text = VersionToken::DESCRIPTOR_FIELDS
            .iter()
            .fold(self.text.clone(), |data, token| {
                match token.inject(&data, version) {
                    Some(patched) => patched,
                    None => {
                        tracing::debug!(field = token.name(), "descriptor field not present");
                        data
                    }
                }
            });
        Descriptor { text }
    }
}
