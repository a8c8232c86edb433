use super::Renderer;
use crate::model::{Domain, Header, Procedure, Table};

/// Terminator token the procedure wrapper switches to, so bodies containing
/// the default `;` survive re-splitting.
const PROCEDURE_TERMINATOR: &str = "^";

/// Canonical SQL-script renderer.
pub struct SqlRenderer;

impl Renderer for SqlRenderer {
    fn extension(&self) -> &'static str {
        "sql"
    }

    fn render_header(&self, header: &Header) -> String {
        let mut sql = String::new();
        sql.push_str(&format!("SET SQL DIALECT {};\n", header.dialect));
        sql.push_str(&format!("SET NAMES {};\n", header.charset));
        sql.push('\n');
        sql.push_str(&format!(
            "CREATE DATABASE '{}'\n",
            header.db_file_path().display()
        ));
        sql.push_str(&format!(
            "USER '{}' PASSWORD '{}'\n",
            header.user, header.password
        ));
        sql.push_str(&format!("PAGE_SIZE {}\n", header.page_size));
        sql.push_str(&format!(
            "DEFAULT CHARACTER SET {} COLLATION NONE;",
            header.charset
        ));
        sql.trim().to_string()
    }

    fn render_domains(&self, domains: &[Domain]) -> String {
        let mut sql = String::new();
        for domain in domains {
            sql.push_str(&format!("CREATE DOMAIN {} AS {}", domain.name, domain.base_type));
            if let Some(default) = &domain.default {
                sql.push_str(&format!("\n  DEFAULT {}", default));
            }
            if let Some(check) = &domain.check {
                sql.push_str(&format!("\n  CHECK {}", check));
            }
            if domain.not_null {
                sql.push_str("\n  NOT NULL");
            }
            sql.push_str(";\n");
        }
        sql.trim().to_string()
    }

    fn render_tables(&self, tables: &[Table]) -> String {
        let mut sql = String::new();
        for table in tables {
            sql.push_str(&format!("CREATE TABLE {} (\n", table.name));

            let mut lines: Vec<String> = table
                .columns
                .iter()
                .map(|column| {
                    let mut line = format!("    {} {}", column.name, column.type_or_domain);
                    if let Some(default) = &column.default {
                        line.push_str(&format!(" DEFAULT {}", default));
                    }
                    if column.not_null {
                        line.push_str(" NOT NULL");
                    }
                    if column.primary_key {
                        line.push_str(" PRIMARY KEY");
                    }
                    line
                })
                .collect();
            lines.extend(
                table
                    .constraints
                    .iter()
                    .map(|constraint| format!("    CONSTRAINT {}", constraint)),
            );

            sql.push_str(&lines.join(",\n"));
            sql.push_str("\n);\n\n");
        }
        sql.trim().to_string()
    }

    fn render_procedures(&self, procedures: &[Procedure]) -> String {
        let mut sql = String::new();
        for procedure in procedures {
            // Bodies legally contain the default terminator, so each
            // procedure is wrapped in a terminator-switch pair.
            sql.push_str(&format!("SET TERM {} ;\n", PROCEDURE_TERMINATOR));
            sql.push_str(&format!("CREATE PROCEDURE {} (\n", procedure.name));
            if !procedure.inputs.is_empty() {
                sql.push_str(&format!("    {}\n", render_parameters(&procedure.inputs)));
            }
            sql.push_str(")\n");
            if !procedure.outputs.is_empty() {
                sql.push_str("RETURNS (\n");
                sql.push_str(&format!("    {}\n", render_parameters(&procedure.outputs)));
                sql.push_str(")\n");
            }
            sql.push_str("AS\n");
            sql.push_str(&format!("{}{}\n", procedure.body, PROCEDURE_TERMINATOR));
            sql.push_str(&format!("SET TERM ; {}\n\n", PROCEDURE_TERMINATOR));
        }
        sql.trim().to_string()
    }
}

fn render_parameters(parameters: &[crate::model::Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", p.name, p.type_or_domain))
        .collect::<Vec<_>>()
        .join(",\n    ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Parameter};

    fn renderer() -> SqlRenderer {
        SqlRenderer
    }

    #[test]
    fn test_render_header() {
        let header = Header {
            dialect: 3,
            charset: "UTF8".to_string(),
            db_file_directory: "/srv/db".to_string(),
            db_file_name: "app.fdb".to_string(),
            page_size: 8192,
            user: "SYSDBA".to_string(),
            password: "masterkey".to_string(),
        };
        let sql = renderer().render_header(&header);

        assert!(sql.starts_with("SET SQL DIALECT 3;"));
        assert!(sql.contains("SET NAMES UTF8;"));
        assert!(sql.contains("CREATE DATABASE '/srv/db/app.fdb'"));
        assert!(sql.contains("USER 'SYSDBA' PASSWORD 'masterkey'"));
        assert!(sql.contains("PAGE_SIZE 8192"));
        assert!(sql.ends_with("DEFAULT CHARACTER SET UTF8 COLLATION NONE;"));
    }

    #[test]
    fn test_render_domain_readds_stripped_keywords() {
        let domains = vec![Domain {
            name: "D_QTY".to_string(),
            base_type: "INTEGER".to_string(),
            default: Some("0".to_string()),
            not_null: true,
            check: Some("(VALUE >= 0)".to_string()),
        }];
        let sql = renderer().render_domains(&domains);

        assert!(sql.contains("CREATE DOMAIN D_QTY AS INTEGER"));
        assert!(sql.contains("DEFAULT 0"));
        assert!(sql.contains("CHECK (VALUE >= 0)"));
        assert!(sql.contains("NOT NULL"));
        assert!(sql.ends_with(';'));
    }

    #[test]
    fn test_render_bare_domain() {
        let domains = vec![Domain {
            name: "D_NAME".to_string(),
            base_type: "VARCHAR(60)".to_string(),
            default: None,
            not_null: false,
            check: None,
        }];
        assert_eq!(
            renderer().render_domains(&domains),
            "CREATE DOMAIN D_NAME AS VARCHAR(60);"
        );
    }

    #[test]
    fn test_render_table_with_inline_pk_and_constraints() {
        let tables = vec![Table {
            name: "ORDERS".to_string(),
            columns: vec![
                Column {
                    name: "ID".to_string(),
                    type_or_domain: "INTEGER".to_string(),
                    primary_key: true,
                    not_null: true,
                    default: None,
                },
                Column {
                    name: "QTY".to_string(),
                    type_or_domain: "D_QTY".to_string(),
                    primary_key: false,
                    not_null: false,
                    default: Some("1".to_string()),
                },
            ],
            constraints: vec![
                "FK_ORDERS_CUST FOREIGN KEY (CUST_ID) REFERENCES CUSTOMERS(ID)".to_string(),
            ],
        }];
        let sql = renderer().render_tables(&tables);

        assert!(sql.contains("CREATE TABLE ORDERS ("));
        assert!(sql.contains("    ID INTEGER NOT NULL PRIMARY KEY,"));
        assert!(sql.contains("    QTY D_QTY DEFAULT 1,"));
        assert!(sql.contains(
            "    CONSTRAINT FK_ORDERS_CUST FOREIGN KEY (CUST_ID) REFERENCES CUSTOMERS(ID)"
        ));
        assert!(sql.ends_with(");"));
    }

    #[test]
    fn test_render_procedure_wrapped_in_terminator_switch() {
        let procedures = vec![Procedure {
            name: "ADD_ORDER".to_string(),
            inputs: vec![Parameter {
                name: "P_QTY".to_string(),
                type_or_domain: "INTEGER".to_string(),
            }],
            outputs: vec![Parameter {
                name: "O_ID".to_string(),
                type_or_domain: "INTEGER".to_string(),
            }],
            body: "BEGIN\n  O_ID = 1;\nEND".to_string(),
        }];
        let sql = renderer().render_procedures(&procedures);

        assert!(sql.starts_with("SET TERM ^ ;"));
        assert!(sql.contains("CREATE PROCEDURE ADD_ORDER (\n    P_QTY INTEGER\n)"));
        assert!(sql.contains("RETURNS (\n    O_ID INTEGER\n)"));
        assert!(sql.contains("AS\nBEGIN\n  O_ID = 1;\nEND^"));
        assert!(sql.ends_with("SET TERM ; ^"));
    }

    #[test]
    fn test_rendered_procedure_survives_resplitting() {
        let procedures = vec![Procedure {
            name: "NOOP".to_string(),
            inputs: vec![],
            outputs: vec![],
            body: "BEGIN\n  EXIT;\nEND".to_string(),
        }];
        let sql = renderer().render_procedures(&procedures);

        let split = crate::script::split_script(&sql);
        assert_eq!(split.terminator, "^");
        assert_eq!(split.statements.len(), 1);
        assert!(split.statements[0].sql.contains("EXIT;"));
    }

    #[test]
    fn test_rendering_is_deterministic_and_trimmed() {
        let domains = vec![Domain {
            name: "D_X".to_string(),
            base_type: "INTEGER".to_string(),
            default: None,
            not_null: false,
            check: None,
        }];
        let first = renderer().render_domains(&domains);
        let second = renderer().render_domains(&domains);
        assert_eq!(first, second);
        assert_eq!(first, first.trim());
    }
}
