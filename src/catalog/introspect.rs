use super::port::{CatalogPort, ColumnRow, ConstraintKind, FieldType, ParamDirection};
use super::types::map_field_type;
use crate::db::connection::ConnectParams;
use crate::error::Result;
use crate::model::{Column, Domain, Header, Parameter, Procedure, Table};
use std::path::Path;
use tracing::debug;

/// Dialect of the supported engine version; newer servers always report 3.
const SQL_DIALECT: u8 = 3;

/// Marker prefix of engine-internal field definitions. A column whose field
/// source does not carry it references a user domain.
const SYSTEM_FIELD_PREFIX: &str = "RDB$";

/// Strip a leading keyword (`DEFAULT`, `CHECK`) from catalog source text.
/// Comparison is case-insensitive; the keyword is re-added by the renderer.
pub fn trim_leading_keyword(text: &str, keyword: &str) -> String {
    let trimmed = text.trim();
    match trimmed.get(..keyword.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(keyword) => {
            trimmed[keyword.len()..].trim_start().to_string()
        }
        _ => trimmed.to_string(),
    }
}

fn non_blank(source: Option<String>) -> Option<String> {
    source.filter(|s| !s.trim().is_empty())
}

/// Read database-level facts from the catalog and the connection's own
/// configuration. Returns `None` when the engine exposes no storage facts.
pub fn extract_header<C: CatalogPort>(
    catalog: &mut C,
    params: &ConnectParams,
) -> Result<Option<Header>> {
    let Some(info) = catalog.database_info()? else {
        return Ok(None);
    };

    let path = Path::new(&info.path);
    let directory = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(Header {
        dialect: SQL_DIALECT,
        charset: info.charset,
        db_file_directory: directory,
        db_file_name: file_name,
        page_size: info.page_size,
        user: params.user.clone(),
        password: params.password.clone(),
    }))
}

/// Enumerate user-defined domains.
pub fn extract_domains<C: CatalogPort>(catalog: &mut C) -> Result<Vec<Domain>> {
    let rows = catalog.list_domains()?;
    debug!(count = rows.len(), "extracted domain definitions");

    Ok(rows
        .into_iter()
        .map(|row| Domain {
            base_type: map_field_type(&row.field),
            default: non_blank(row.default_source).map(|s| trim_leading_keyword(&s, "DEFAULT")),
            not_null: row.not_null,
            check: non_blank(row.check_source).map(|s| trim_leading_keyword(&s, "CHECK")),
            name: row.name,
        })
        .collect())
}

fn resolve_column_type(field_source: &str, field: &FieldType) -> String {
    if !field_source.is_empty() && !field_source.starts_with(SYSTEM_FIELD_PREFIX) {
        field_source.to_string()
    } else {
        map_field_type(field)
    }
}

fn build_column(row: ColumnRow, primary_key_columns: &[String]) -> Column {
    let primary_key = primary_key_columns
        .iter()
        .any(|pk| pk.eq_ignore_ascii_case(&row.name));

    Column {
        type_or_domain: resolve_column_type(&row.field_source, &row.field),
        primary_key,
        not_null: row.not_null,
        default: non_blank(row.default_source).map(|s| trim_leading_keyword(&s, "DEFAULT")),
        name: row.name,
    }
}

/// Enumerate user-defined tables with their columns and constraints.
///
/// Primary-key membership is denormalized onto the columns; PRIMARY KEY
/// constraints are therefore never emitted into the constraint set.
pub fn extract_tables<C: CatalogPort>(catalog: &mut C) -> Result<Vec<Table>> {
    let names = catalog.list_tables()?;
    let mut tables = Vec::with_capacity(names.len());

    for name in names {
        let primary_key_columns = catalog.list_primary_key_columns(&name)?;

        let columns = catalog
            .list_table_columns(&name)?
            .into_iter()
            .map(|row| build_column(row, &primary_key_columns))
            .collect();

        let mut constraints = Vec::new();
        for row in catalog.list_constraints(&name)? {
            match row.kind {
                ConstraintKind::PrimaryKey => {}
                ConstraintKind::Unique => {
                    constraints.push(format!("{} UNIQUE ({})", row.name, row.column));
                }
                ConstraintKind::ForeignKey => {
                    let Some(ref_constraint) = row.ref_constraint else {
                        continue;
                    };
                    // The referenced constraint may be gone mid-introspection;
                    // an unresolvable target drops the constraint.
                    if let Some(target) = catalog.resolve_foreign_key_target(&ref_constraint)? {
                        constraints.push(format!(
                            "{} FOREIGN KEY ({}) REFERENCES {}({})",
                            row.name, row.column, target.table, target.column
                        ));
                    }
                }
                ConstraintKind::Check => {
                    if let Some(source) = non_blank(row.check_source) {
                        constraints.push(format!("{} CHECK {}", row.name, source.trim()));
                    }
                }
            }
        }

        tables.push(Table {
            name,
            columns,
            constraints,
        });
    }

    debug!(count = tables.len(), "extracted table definitions");
    Ok(tables)
}

/// Enumerate user-defined procedures with their parameter lists and verbatim
/// bodies.
pub fn extract_procedures<C: CatalogPort>(catalog: &mut C) -> Result<Vec<Procedure>> {
    let rows = catalog.list_procedures()?;
    let mut procedures = Vec::with_capacity(rows.len());

    for row in rows {
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();

        for param in catalog.list_procedure_parameters(&row.name)? {
            let parameter = Parameter {
                type_or_domain: resolve_column_type(&param.field_source, &param.field),
                name: param.name,
            };
            match param.direction {
                ParamDirection::Input => inputs.push(parameter),
                ParamDirection::Output => outputs.push(parameter),
            }
        }

        procedures.push(Procedure {
            name: row.name,
            inputs,
            outputs,
            body: row.source.trim().to_string(),
        });
    }

    debug!(count = procedures.len(), "extracted procedure definitions");
    Ok(procedures)
}
