//! Capture and project fixtures shared by command tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

pub const QUERY: &str = "query GetCharacter($id: ID!) {\n  getCharacter(id: $id) {\n    __typename\n    id\n    name\n    friends { id }\n  }\n}";

fn entry(operation: &str, query: &str, response: &Value) -> Value {
    let body = json!({
        "operationName": operation,
        "query": query,
        "variables": {"id": "1002"},
    });
    json!({
        "request": {
            "method": "POST",
            "url": "http://localhost:4000/graphql",
            "postData": {"mimeType": "application/json", "text": body.to_string()}
        },
        "response": {"status": 200, "content": {"text": response.to_string()}}
    })
}

/// `trace.har` holding one `GetCharacter` exchange.
pub fn write_capture(dir: &Path) -> PathBuf {
    let response = json!({"data": {"getCharacter": {
        "__typename": "Character",
        "id": "1002",
        "name": "Diana",
        "friends": [{"id": "1003"}]
    }}});
    let document = json!({"log": {"version": "1.2", "entries": [
        {"request": {"method": "GET", "url": "http://localhost:4000/"}, "response": {"status": 200, "content": {}}},
        entry("GetCharacter", QUERY, &response),
    ]}});
    let path = dir.join("trace.har");
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

/// A freshly scaffolded k6 project with placeholder scenario and data.
pub fn write_project(root: &Path) {
    let files = [
        (
            "main.ts",
            "import { testData } from './testdata/testdata';\nimport { getScenarioData } from './helpers/utils';\n\nconst allData = testData[__ENV.ENV || 'dev'];\n\nexport function exampleTestScenario() {\n  console.log(getScenarioData(allData, 'exampleTestData'));\n}\n",
        ),
        (
            "config/options.smoke.json",
            "{\n  \"scenarios\": {\n    \"exampleTestScenario\": { \"exec\": \"exampleTestScenario\" }\n  }\n}\n",
        ),
        (
            "testdata/testdata.dev.ts",
            "export const dev = {\n  scenarios: [\n    { name: 'exampleTestData' },\n  ],\n};\n",
        ),
    ];
    for (path, contents) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, contents).unwrap();
    }
}
