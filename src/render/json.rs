use super::Renderer;
use crate::model::{Domain, Header, Procedure, Table};
use serde::Serialize;

/// Machine-readable export format; serializes the schema model as-is.
pub struct JsonRenderer;

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    // The model is plain structs and strings; serialization cannot fail.
    serde_json::to_string_pretty(value).expect("schema model serializes to JSON")
}

impl Renderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render_header(&self, header: &Header) -> String {
        to_pretty_json(header)
    }

    fn render_domains(&self, domains: &[Domain]) -> String {
        to_pretty_json(&domains)
    }

    fn render_tables(&self, tables: &[Table]) -> String {
        to_pretty_json(&tables)
    }

    fn render_procedures(&self, procedures: &[Procedure]) -> String {
        to_pretty_json(&procedures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    #[test]
    fn test_tables_render_as_json_array() {
        let tables = vec![Table {
            name: "CUSTOMERS".to_string(),
            columns: vec![Column {
                name: "ID".to_string(),
                type_or_domain: "INTEGER".to_string(),
                primary_key: true,
                not_null: true,
                default: None,
            }],
            constraints: vec![],
        }];
        let json = JsonRenderer.render_tables(&tables);

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "CUSTOMERS");
        assert_eq!(parsed[0]["columns"][0]["primary_key"], true);
    }
}
