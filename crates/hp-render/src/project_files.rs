//! Per-operation sources and entry-file snippets for a k6 scaffold project.

use hp_core::naming::OperationNames;

use crate::escape;

/// Module that provides `describe` and `expect` in scaffold projects.
pub const CHAI_MODULE: &str = "https://jslib.k6.io/k6chaijs/4.3.4.3/index.js";

/// `queries/<op>Query.ts`: the query text as an exported template literal.
#[must_use]
pub fn query_file(names: &OperationNames, query: &str) -> String {
    format!(
        "export const {} = `{}`;\n",
        names.query(),
        escape::template_literal(query)
    )
}

/// `tests/<op>Test.ts`: wraps the step in a `describe` block.
#[must_use]
pub fn test_file(names: &OperationNames) -> String {
    let step = names.step();
    format!(
        "import {{ describe }} from \"{CHAI_MODULE}\";\n\
         import {{ {step} }} from \"../steps/{step}.js\";\n\
         \n\
         export function {test}(scenario: any) {{\n\
         \x20 describe({title}, () => {{\n\
         \x20   {step}(scenario);\n\
         \x20 }});\n\
         }}\n",
        test = names.test(),
        title = escape::double_quoted(&format!("{} test", names.operation())),
    )
}

/// Import line the entry file needs for the test function.
#[must_use]
pub fn entry_import(names: &OperationNames) -> String {
    let test = names.test();
    format!("import {{ {test} }} from './tests/{test}.js';")
}

/// Exported scenario function appended to the entry file.
#[must_use]
pub fn entry_scenario(names: &OperationNames) -> String {
    format!(
        "export function {scenario}() {{\n\
         \x20 const scenario = getScenarioData(\n\
         \x20   allData,\n\
         \x20   '{data}'\n\
         \x20 );\n\
         \x20 {test}(scenario);\n\
         }}\n",
        scenario = names.scenario(),
        data = names.test_data(),
        test = names.test(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_file_exports_escaped_template() {
        let names = OperationNames::new("GetCharacter");
        assert_eq!(
            query_file(&names, "query GetCharacter { a(s: \"`${x}`\") }"),
            "export const getCharacterQuery = `query GetCharacter { a(s: \"\\`\\${x}\\`\") }`;\n"
        );
    }

    #[test]
    fn test_file_wraps_step_in_describe() {
        let text = test_file(&OperationNames::new("GetCharacter"));
        assert_eq!(
            text,
            "import { describe } from \"https://jslib.k6.io/k6chaijs/4.3.4.3/index.js\";\n\
             import { getCharacterStep } from \"../steps/getCharacterStep.js\";\n\
             \n\
             export function getCharacterTest(scenario: any) {\n\
             \x20 describe(\"GetCharacter test\", () => {\n\
             \x20   getCharacterStep(scenario);\n\
             \x20 });\n\
             }\n"
        );
    }

    #[test]
    fn entry_snippets_use_derived_names() {
        let names = OperationNames::new("GetCharacter");
        assert_eq!(
            entry_import(&names),
            "import { getCharacterTest } from './tests/getCharacterTest.js';"
        );
        let scenario = entry_scenario(&names);
        assert!(scenario.starts_with("export function getCharacterTestScenario() {\n"));
        assert!(scenario.contains("'getCharacterTestData'"));
        assert!(scenario.contains("  getCharacterTest(scenario);\n}\n"));
    }
}
