//! Engine adapter over the pure-Rust Firebird wire client.
//!
//! Everything engine-specific lives here, behind the `firebird` cargo
//! feature: the RDB$/MON$ system-table queries and the wire connection
//! itself. The rest of the crate sees only [`StatementExecutor`],
//! [`CatalogPort`] and [`DatabaseProvider`].

use super::connection::ConnectParams;
use super::{CreateDatabaseOptions, DatabaseProvider, StatementExecutor};
use crate::catalog::port::{
    CatalogPort, ColumnRow, ConstraintKind, ConstraintRow, DatabaseInfo, DomainRow, FieldType,
    ForeignKeyTarget, ObjectKind, ParamDirection, ParameterRow, ProcedureRow,
};
use crate::error::{FbmgError, Result};
use rsfbclient::{prelude::*, SimpleConnection};
use tracing::debug;

/// An open connection to a Firebird database.
pub struct FirebirdDatabase {
    conn: SimpleConnection,
}

/// Connect to an existing database.
pub fn connect(params: &ConnectParams) -> Result<FirebirdDatabase> {
    debug!(host = %params.host, database = %params.database, "connecting");
    let conn = rsfbclient::builder_pure_rust()
        .host(params.host.as_str())
        .port(params.port)
        .db_name(params.database.as_str())
        .user(params.user.as_str())
        .pass(params.password.as_str())
        .connect()?;
    Ok(FirebirdDatabase { conn: conn.into() })
}

/// Provider creating databases over the wire protocol.
pub struct FirebirdProvider {
    pub host: String,
    pub port: u16,
}

impl Default for FirebirdProvider {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: super::connection::DEFAULT_PORT,
        }
    }
}

impl DatabaseProvider for FirebirdProvider {
    type Database = FirebirdDatabase;

    fn create_database(&self, options: &CreateDatabaseOptions) -> Result<Self::Database> {
        let path = options.path.to_string_lossy().into_owned();
        if options.overwrite && options.path.exists() {
            std::fs::remove_file(&options.path).map_err(|e| {
                FbmgError::DatabaseCreation(format!("cannot overwrite {}: {}", path, e))
            })?;
        }

        debug!(path = %path, page_size = options.page_size, "creating database");
        let conn = rsfbclient::builder_pure_rust()
            .host(self.host.as_str())
            .port(self.port)
            .db_name(path.as_str())
            .user(options.user.as_str())
            .pass(options.password.as_str())
            .page_size(options.page_size)
            .create_database()
            .map_err(|e| FbmgError::DatabaseCreation(e.to_string()))?;

        Ok(FirebirdDatabase { conn: conn.into() })
    }
}

impl StatementExecutor for FirebirdDatabase {
    fn execute_statement(&mut self, sql: &str) -> Result<()> {
        self.conn.execute(sql, ())?;
        Ok(())
    }
}

fn field_type(
    code: i32,
    length: i32,
    precision: Option<i32>,
    scale: Option<i32>,
    sub_type: Option<i32>,
) -> FieldType {
    FieldType {
        code: code as i16,
        length: length as i16,
        precision: precision.map(|p| p as i16),
        scale: scale.map(|s| s as i16),
        sub_type: sub_type.map(|s| s as i16),
    }
}

impl CatalogPort for FirebirdDatabase {
    fn database_info(&mut self) -> Result<Option<DatabaseInfo>> {
        let rows: Vec<(String, i32)> = self.conn.query(
            "SELECT MON$DATABASE_NAME, CAST(MON$PAGE_SIZE AS INTEGER) FROM MON$DATABASE",
            (),
        )?;
        let Some((path, page_size)) = rows.into_iter().next() else {
            return Ok(None);
        };

        let charset_rows: Vec<(Option<String>,)> = self
            .conn
            .query("SELECT RDB$CHARACTER_SET_NAME FROM RDB$DATABASE", ())?;
        let charset = charset_rows
            .into_iter()
            .next()
            .and_then(|(cs,)| cs)
            .map(|cs| cs.trim().to_string())
            .unwrap_or_else(|| "NONE".to_string());

        Ok(Some(DatabaseInfo {
            path: path.trim().to_string(),
            page_size: page_size as u32,
            charset,
        }))
    }

    fn list_domains(&mut self) -> Result<Vec<DomainRow>> {
        type Row = (
            String,
            i32,
            i32,
            Option<i32>,
            Option<i32>,
            Option<i32>,
            Option<String>,
            Option<String>,
            Option<i32>,
        );
        let rows: Vec<Row> = self.conn.query(
            "SELECT RDB$FIELD_NAME, CAST(RDB$FIELD_TYPE AS INTEGER), \
                    CAST(RDB$FIELD_LENGTH AS INTEGER), CAST(RDB$FIELD_PRECISION AS INTEGER), \
                    CAST(RDB$FIELD_SCALE AS INTEGER), CAST(RDB$FIELD_SUB_TYPE AS INTEGER), \
                    RDB$DEFAULT_SOURCE, RDB$VALIDATION_SOURCE, CAST(RDB$NULL_FLAG AS INTEGER) \
             FROM RDB$FIELDS \
             WHERE RDB$SYSTEM_FLAG = 0 AND RDB$FIELD_NAME NOT LIKE 'RDB$%'",
            (),
        )?;

        Ok(rows
            .into_iter()
            .map(
                |(name, code, length, precision, scale, sub_type, default, check, null_flag)| {
                    DomainRow {
                        name: name.trim().to_string(),
                        field: field_type(code, length, precision, scale, sub_type),
                        default_source: default,
                        check_source: check,
                        // Presence of the marker means NOT NULL, regardless of
                        // the stored value.
                        not_null: null_flag.is_some(),
                    }
                },
            )
            .collect())
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self.conn.query(
            "SELECT RDB$RELATION_NAME FROM RDB$RELATIONS \
             WHERE RDB$SYSTEM_FLAG = 0 AND RDB$VIEW_BLR IS NULL",
            (),
        )?;
        Ok(rows
            .into_iter()
            .map(|(name,)| name.trim().to_string())
            .collect())
    }

    fn list_table_columns(&mut self, table: &str) -> Result<Vec<ColumnRow>> {
        type Row = (
            String,
            Option<String>,
            i32,
            i32,
            Option<i32>,
            Option<i32>,
            Option<i32>,
            Option<i32>,
            Option<String>,
        );
        let rows: Vec<Row> = self.conn.query(
            "SELECT rf.RDB$FIELD_NAME, rf.RDB$FIELD_SOURCE, \
                    CAST(f.RDB$FIELD_TYPE AS INTEGER), CAST(f.RDB$FIELD_LENGTH AS INTEGER), \
                    CAST(f.RDB$FIELD_PRECISION AS INTEGER), CAST(f.RDB$FIELD_SCALE AS INTEGER), \
                    CAST(f.RDB$FIELD_SUB_TYPE AS INTEGER), CAST(rf.RDB$NULL_FLAG AS INTEGER), \
                    rf.RDB$DEFAULT_SOURCE \
             FROM RDB$RELATION_FIELDS rf \
             JOIN RDB$FIELDS f ON rf.RDB$FIELD_SOURCE = f.RDB$FIELD_NAME \
             WHERE rf.RDB$RELATION_NAME = ? \
             ORDER BY rf.RDB$FIELD_POSITION",
            (table,),
        )?;

        Ok(rows
            .into_iter()
            .map(
                |(name, source, code, length, precision, scale, sub_type, null_flag, default)| {
                    ColumnRow {
                        name: name.trim().to_string(),
                        field_source: source.map(|s| s.trim().to_string()).unwrap_or_default(),
                        field: field_type(code, length, precision, scale, sub_type),
                        not_null: null_flag.is_some(),
                        default_source: default,
                    }
                },
            )
            .collect())
    }

    fn list_primary_key_columns(&mut self, table: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self.conn.query(
            "SELECT seg.RDB$FIELD_NAME \
             FROM RDB$RELATION_CONSTRAINTS rc \
             JOIN RDB$INDEX_SEGMENTS seg ON rc.RDB$INDEX_NAME = seg.RDB$INDEX_NAME \
             WHERE rc.RDB$RELATION_NAME = ? AND rc.RDB$CONSTRAINT_TYPE = 'PRIMARY KEY'",
            (table,),
        )?;
        Ok(rows
            .into_iter()
            .map(|(name,)| name.trim().to_string())
            .collect())
    }

    fn list_constraints(&mut self, table: &str) -> Result<Vec<ConstraintRow>> {
        type Row = (String, String, String, Option<String>);
        let rows: Vec<Row> = self.conn.query(
            "SELECT rc.RDB$CONSTRAINT_NAME, rc.RDB$CONSTRAINT_TYPE, \
                    seg.RDB$FIELD_NAME, refc.RDB$CONST_NAME_UQ \
             FROM RDB$RELATION_CONSTRAINTS rc \
             JOIN RDB$INDEX_SEGMENTS seg ON rc.RDB$INDEX_NAME = seg.RDB$INDEX_NAME \
             LEFT JOIN RDB$REF_CONSTRAINTS refc \
                    ON rc.RDB$CONSTRAINT_NAME = refc.RDB$CONSTRAINT_NAME \
             WHERE rc.RDB$RELATION_NAME = ?",
            (table,),
        )?;

        let mut constraints = Vec::with_capacity(rows.len());
        for (name, kind, column, ref_constraint) in rows {
            let name = name.trim().to_string();
            let kind = match kind.trim() {
                "PRIMARY KEY" => ConstraintKind::PrimaryKey,
                "UNIQUE" => ConstraintKind::Unique,
                "FOREIGN KEY" => ConstraintKind::ForeignKey,
                "CHECK" => ConstraintKind::Check,
                other => {
                    debug!(constraint = %name, kind = other, "skipping constraint kind");
                    continue;
                }
            };

            let check_source = if kind == ConstraintKind::Check {
                let sources: Vec<(Option<String>,)> = self.conn.query(
                    "SELECT t.RDB$TRIGGER_SOURCE \
                     FROM RDB$CHECK_CONSTRAINTS cc \
                     JOIN RDB$TRIGGERS t ON cc.RDB$TRIGGER_NAME = t.RDB$TRIGGER_NAME \
                     WHERE cc.RDB$CONSTRAINT_NAME = ?",
                    (name.as_str(),),
                )?;
                sources.into_iter().next().and_then(|(s,)| s)
            } else {
                None
            };

            constraints.push(ConstraintRow {
                name,
                kind,
                column: column.trim().to_string(),
                ref_constraint: ref_constraint.map(|r| r.trim().to_string()),
                check_source,
            });
        }
        Ok(constraints)
    }

    fn resolve_foreign_key_target(
        &mut self,
        constraint: &str,
    ) -> Result<Option<ForeignKeyTarget>> {
        let rows: Vec<(String, String)> = self.conn.query(
            "SELECT seg.RDB$FIELD_NAME, rc.RDB$RELATION_NAME \
             FROM RDB$RELATION_CONSTRAINTS rc \
             JOIN RDB$INDEX_SEGMENTS seg ON rc.RDB$INDEX_NAME = seg.RDB$INDEX_NAME \
             WHERE rc.RDB$CONSTRAINT_NAME = ?",
            (constraint,),
        )?;
        Ok(rows.into_iter().next().map(|(column, table)| ForeignKeyTarget {
            table: table.trim().to_string(),
            column: column.trim().to_string(),
        }))
    }

    fn list_procedures(&mut self) -> Result<Vec<ProcedureRow>> {
        let rows: Vec<(String, Option<String>)> = self.conn.query(
            "SELECT RDB$PROCEDURE_NAME, RDB$PROCEDURE_SOURCE \
             FROM RDB$PROCEDURES WHERE RDB$SYSTEM_FLAG = 0",
            (),
        )?;
        Ok(rows
            .into_iter()
            .map(|(name, source)| ProcedureRow {
                name: name.trim().to_string(),
                source: source.unwrap_or_default(),
            })
            .collect())
    }

    fn list_procedure_parameters(&mut self, procedure: &str) -> Result<Vec<ParameterRow>> {
        type Row = (
            String,
            i32,
            Option<String>,
            i32,
            i32,
            Option<i32>,
            Option<i32>,
            Option<i32>,
        );
        let rows: Vec<Row> = self.conn.query(
            "SELECT p.RDB$PARAMETER_NAME, CAST(p.RDB$PARAMETER_TYPE AS INTEGER), \
                    p.RDB$FIELD_SOURCE, CAST(f.RDB$FIELD_TYPE AS INTEGER), \
                    CAST(f.RDB$FIELD_LENGTH AS INTEGER), CAST(f.RDB$FIELD_PRECISION AS INTEGER), \
                    CAST(f.RDB$FIELD_SCALE AS INTEGER), CAST(f.RDB$FIELD_SUB_TYPE AS INTEGER) \
             FROM RDB$PROCEDURE_PARAMETERS p \
             JOIN RDB$FIELDS f ON p.RDB$FIELD_SOURCE = f.RDB$FIELD_NAME \
             WHERE p.RDB$PROCEDURE_NAME = ? \
             ORDER BY p.RDB$PARAMETER_TYPE, p.RDB$PARAMETER_NUMBER",
            (procedure,),
        )?;

        Ok(rows
            .into_iter()
            .map(
                |(name, direction, source, code, length, precision, scale, sub_type)| {
                    ParameterRow {
                        name: name.trim().to_string(),
                        direction: if direction == 0 {
                            ParamDirection::Input
                        } else {
                            ParamDirection::Output
                        },
                        field_source: source.map(|s| s.trim().to_string()).unwrap_or_default(),
                        field: field_type(code, length, precision, scale, sub_type),
                    }
                },
            )
            .collect())
    }

    fn object_exists(&mut self, kind: ObjectKind, name: &str) -> Result<bool> {
        let sql = match kind {
            ObjectKind::Domain => {
                "SELECT CAST(COUNT(*) AS INTEGER) FROM RDB$FIELDS \
                 WHERE RDB$SYSTEM_FLAG = 0 AND TRIM(RDB$FIELD_NAME) = UPPER(?)"
            }
            ObjectKind::Table => {
                "SELECT CAST(COUNT(*) AS INTEGER) FROM RDB$RELATIONS \
                 WHERE RDB$SYSTEM_FLAG = 0 AND RDB$VIEW_BLR IS NULL \
                   AND TRIM(RDB$RELATION_NAME) = UPPER(?)"
            }
            ObjectKind::Procedure => {
                "SELECT CAST(COUNT(*) AS INTEGER) FROM RDB$PROCEDURES \
                 WHERE RDB$SYSTEM_FLAG = 0 AND TRIM(RDB$PROCEDURE_NAME) = UPPER(?)"
            }
            ObjectKind::Trigger => {
                "SELECT CAST(COUNT(*) AS INTEGER) FROM RDB$TRIGGERS \
                 WHERE RDB$SYSTEM_FLAG = 0 AND TRIM(RDB$TRIGGER_NAME) = UPPER(?)"
            }
        };
        let rows: Vec<(i32,)> = self.conn.query(sql, (name,))?;
        Ok(rows.into_iter().next().map(|(n,)| n > 0).unwrap_or(false))
    }
}
