/// A field in a semi-structured text file, identified by the markers around it.
///
/// Extraction and mutation work on raw substrings so the rest of the file is
/// never reformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionToken {
    pub start: &'static str,
    pub end: &'static str,
}

impl VersionToken {
    pub const VERSION: VersionToken = VersionToken::new("<Version>", "</Version>");
    pub const ASSEMBLY_VERSION: VersionToken =
        VersionToken::new("<AssemblyVersion>", "</AssemblyVersion>");
    pub const FILE_VERSION: VersionToken = VersionToken::new("<FileVersion>", "</FileVersion>");
    pub const INFORMATIONAL_VERSION: VersionToken =
        VersionToken::new("<InformationalVersion>", "</InformationalVersion>");

    /// The four version fields of a project descriptor, `<Version>` first.
    pub const DESCRIPTOR_FIELDS: [VersionToken; 4] = [
        VersionToken::VERSION,
        VersionToken::ASSEMBLY_VERSION,
        VersionToken::FILE_VERSION,
        VersionToken::INFORMATIONAL_VERSION,
    ];

    pub const fn new(start: &'static str, end: &'static str) -> Self {
        VersionToken { start, end }
    }

    /// Byte range of the whole element (markers included) and of its value.
    fn locate(&self, data: &str) -> Option<(usize, usize, usize)> {
        let start_idx = data.find(self.start)?;
        let value_idx = start_idx + self.start.len();
        let end_idx = value_idx + data[value_idx..].find(self.end)?;
        Some((start_idx, value_idx, end_idx))
    }

    /// Returns the text between the first start marker and the end marker after it.
    pub fn extract<'a>(&self, data: &'a str) -> Option<&'a str> {
        self.locate(data)
            .map(|(_, value_idx, end_idx)| &data[value_idx..end_idx])
    }

    /// Replaces the value of every occurrence of the first matched element.
    ///
    /// Returns `None` when the markers are absent; the input is left as is.
    pub fn inject(&self, data: &str, value: &str) -> Option<String> {
        let (start_idx, _, end_idx) = self.locate(data)?;
        let element = &data[start_idx..end_idx + self.end.len()];
        let replacement = format!("{}{}{}", self.start, value, self.end);
        Some(data.replace(element, &replacement))
    }

    /// Name of the field without angle brackets, for messages.
    pub fn name(&self) -> &'static str {
        self.start.trim_start_matches('<').trim_end_matches('>')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSPROJ: &str = r#"<Project Sdk="Dalamud.NET.Sdk/12.0.2">
  <PropertyGroup>
    <Version>1.2.0.0</Version>
    <AssemblyVersion>1.2.0.0</AssemblyVersion>
    <FileVersion>1.2.0.0</FileVersion>
    <InformationalVersion>1.2.0.0</InformationalVersion>
  </PropertyGroup>
</Project>
"#;

    #[test]
    fn test_extract() {
        assert_eq!(VersionToken::VERSION.extract(CSPROJ), Some("1.2.0.0"));
        assert_eq!(
            VersionToken::INFORMATIONAL_VERSION.extract(CSPROJ),
            Some("1.2.0.0")
        );
    }

    #[test]
    fn test_extract_missing_marker() {
        assert_eq!(VersionToken::VERSION.extract("<Project />"), None);
        assert_eq!(VersionToken::VERSION.extract("<Version>1.0"), None);
    }

    #[test]
    fn test_extract_ignores_end_marker_before_start() {
        let data = "</Version> <Version>2.0</Version>";
        assert_eq!(VersionToken::VERSION.extract(data), Some("2.0"));
    }

    #[test]
    fn test_inject_then_extract_yields_new_value() {
        let patched = VersionToken::VERSION.inject(CSPROJ, "1.3.0.0").unwrap();
        assert_eq!(VersionToken::VERSION.extract(&patched), Some("1.3.0.0"));
        // Other fields are untouched.
        assert_eq!(
            VersionToken::FILE_VERSION.extract(&patched),
            Some("1.2.0.0")
        );
    }

    #[test]
    fn test_inject_preserves_surrounding_text() {
        let patched = VersionToken::ASSEMBLY_VERSION
            .inject(CSPROJ, "9.9")
            .unwrap();
        assert_eq!(
            patched,
            CSPROJ.replace(
                "<AssemblyVersion>1.2.0.0</AssemblyVersion>",
                "<AssemblyVersion>9.9</AssemblyVersion>"
            )
        );
    }

    #[test]
    fn test_inject_is_idempotent() {
        let once = VersionToken::VERSION.inject(CSPROJ, "1.3.0.0").unwrap();
        let twice = VersionToken::VERSION.inject(&once, "1.3.0.0").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inject_missing_marker() {
        assert_eq!(VersionToken::FILE_VERSION.inject("<Project />", "1.0"), None);
    }

    #[test]
    fn test_name() {
        assert_eq!(VersionToken::FILE_VERSION.name(), "FileVersion");
    }
}
