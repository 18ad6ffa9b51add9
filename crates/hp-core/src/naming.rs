//! Identifier derivation for generated scaffold artifacts.
//!
//! Every artifact generated for an operation is named from the operation name
//! with its first character lower-cased: `GetCharacter` yields
//! `getCharacterQuery`, `getCharacterStep`, `getCharacterTest`,
//! `getCharacterTestScenario` and `getCharacterTestData`.

/// Whether `name` is a GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`).
#[must_use]
pub fn is_valid_operation_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

/// Whether `name` can be used after a `.` in JavaScript without quoting.
#[must_use]
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first == '$' || first.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch == '$' || ch.is_ascii_alphanumeric())
}

/// Lower-case the first character, leaving the rest untouched.
#[must_use]
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// The family of identifiers generated for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    operation: String,
    stem: String,
}

impl OperationNames {
    #[must_use]
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            stem: lower_first(operation),
        }
    }

    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[must_use]
    pub fn query(&self) -> String {
        format!("{}Query", self.stem)
    }

    #[must_use]
    pub fn step(&self) -> String {
        format!("{}Step", self.stem)
    }

    #[must_use]
    pub fn test(&self) -> String {
        format!("{}Test", self.stem)
    }

    /// Exported entry-file function and run-configuration scenario key.
    #[must_use]
    pub fn scenario(&self) -> String {
        format!("{}TestScenario", self.stem)
    }

    /// `name` of the scenario object in the test-data file.
    #[must_use]
    pub fn test_data(&self) -> String {
        format!("{}TestData", self.stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_scaffold_identifiers() {
        let names = OperationNames::new("GetCharacter");
        assert_eq!(names.query(), "getCharacterQuery");
        assert_eq!(names.step(), "getCharacterStep");
        assert_eq!(names.test(), "getCharacterTest");
        assert_eq!(names.scenario(), "getCharacterTestScenario");
        assert_eq!(names.test_data(), "getCharacterTestData");
    }

    #[test]
    fn lower_first_handles_short_and_empty_names() {
        assert_eq!(lower_first(""), "");
        assert_eq!(lower_first("Q"), "q");
        assert_eq!(lower_first("already"), "already");
    }

    #[test]
    fn operation_name_validation() {
        assert!(is_valid_operation_name("GetCharacter"));
        assert!(is_valid_operation_name("_private2"));
        assert!(!is_valid_operation_name("2fast"));
        assert!(!is_valid_operation_name("get-thing"));
        assert!(!is_valid_operation_name(""));
    }

    #[test]
    fn js_identifier_accepts_dollar_and_rejects_dashes() {
        assert!(is_js_identifier("__typename"));
        assert!(is_js_identifier("$ref"));
        assert!(!is_js_identifier("first-name"));
        assert!(!is_js_identifier("1st"));
    }
}
