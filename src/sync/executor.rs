use super::report::{FileOutcome, SyncReport};
use crate::catalog::{CatalogPort, ObjectKind};
use crate::db::StatementExecutor;
use crate::script::{split_script, ScriptFile};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// How statements are applied to the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Execute scripts verbatim against a fresh, empty database.
    Build,
    /// Reapply scripts onto a populated database: redefinable objects are
    /// rewritten to `CREATE OR ALTER`, non-redefinable ones are skipped with
    /// a warning when they already exist.
    Update,
}

fn redefinable_create_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Procedures and triggers are the only safely redefinable kinds; a
    // statement already spelled CREATE OR ALTER no longer matches, which
    // makes the rewrite idempotent.
    RE.get_or_init(|| {
        Regex::new(r"(?im)^(\s*)CREATE(\s+)(PROCEDURE|TRIGGER)\b").expect("valid pattern")
    })
}

/// Rewrite script text so redefinable objects reapply cleanly:
/// `CREATE PROCEDURE` → `CREATE OR ALTER PROCEDURE`, likewise for triggers.
/// No other characters are altered.
pub fn rewrite_redefinable(script: &str) -> String {
    redefinable_create_re()
        .replace_all(script, "${1}CREATE OR ALTER${2}${3}")
        .into_owned()
}

/// For a statement creating a non-redefinable object, return the object kind
/// and name (the third whitespace-delimited token, stripped of a glued
/// parenthesis). Domains and tables reject redefinition, so the executor
/// checks the catalog before running them.
pub fn creation_target(stmt: &str) -> Option<(ObjectKind, &str)> {
    let mut tokens = stmt.split_whitespace();
    if !tokens.next()?.eq_ignore_ascii_case("CREATE") {
        return None;
    }
    let kind = match tokens.next()? {
        word if word.eq_ignore_ascii_case("DOMAIN") => ObjectKind::Domain,
        word if word.eq_ignore_ascii_case("TABLE") => ObjectKind::Table,
        _ => return None,
    };
    let name = tokens.next()?.split('(').next()?;
    if name.is_empty() {
        None
    } else {
        Some((kind, name))
    }
}

/// Execute every statement of one script, isolating failures to the
/// statement level, and append the file's outcome to the report.
pub fn run_script_text<D>(
    db: &mut D,
    content: &str,
    file_name: &str,
    mode: SyncMode,
    report: &mut SyncReport,
) where
    D: StatementExecutor + CatalogPort,
{
    let content = match mode {
        SyncMode::Build => content.to_string(),
        SyncMode::Update => rewrite_redefinable(content),
    };

    let split = split_script(&content);
    debug!(
        file = file_name,
        statements = split.statements.len(),
        terminator = %split.terminator,
        "executing script"
    );

    let mut outcome = FileOutcome::new(file_name);

    for statement in &split.statements {
        if mode == SyncMode::Update {
            if let Some((kind, name)) = creation_target(&statement.sql) {
                match db.object_exists(kind, name) {
                    Ok(true) => {
                        outcome.warnings.push(format!(
                            "{} {} already exists, statement skipped",
                            kind.as_str(),
                            name
                        ));
                        continue;
                    }
                    Ok(false) => {}
                    Err(err) => {
                        outcome.errors.push(format!(
                            "ERROR checking existing {} {}:\n{}",
                            kind.as_str(),
                            name,
                            err
                        ));
                        continue;
                    }
                }
            }
        }

        if let Err(err) = db.execute_statement(&statement.sql) {
            outcome.errors.push(format!(
                "ERROR executing statement:\n{}\n{}",
                statement.sql, err
            ));
        }
    }

    info!(
        file = file_name,
        ok = outcome.is_ok(),
        warnings = outcome.warnings.len(),
        errors = outcome.errors.len(),
        "script finished"
    );
    report.push(outcome);
}

/// Execute an ordered collection of script files. A failing file never stops
/// its siblings; every input file ends up with a report entry.
pub fn run_scripts<D>(
    db: &mut D,
    scripts: &[ScriptFile],
    mode: SyncMode,
    report: &mut SyncReport,
) where
    D: StatementExecutor + CatalogPort,
{
    for script in scripts {
        match script.read_content() {
            Ok(content) => run_script_text(db, &content, &script.name, mode, report),
            Err(err) => {
                let mut outcome = FileOutcome::new(script.name.as_str());
                outcome.errors.push(format!("ERROR reading script:\n{}", err));
                report.push(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::port::{
        ColumnRow, ConstraintRow, DatabaseInfo, DomainRow, ForeignKeyTarget, ParameterRow,
        ProcedureRow,
    };
    use crate::error::{FbmgError, Result};
    use indoc::indoc;

    /// In-memory stand-in for an open connection: records executed
    /// statements, fails on demand, and answers existence checks from a
    /// fixed list.
    #[derive(Default)]
    struct FakeDb {
        executed: Vec<String>,
        fail_on: Vec<String>,
        existing: Vec<(ObjectKind, String)>,
    }

    impl StatementExecutor for FakeDb {
        fn execute_statement(&mut self, sql: &str) -> Result<()> {
            if self.fail_on.iter().any(|marker| sql.contains(marker)) {
                return Err(FbmgError::Database("token unknown".to_string()));
            }
            self.executed.push(sql.to_string());
            Ok(())
        }
    }

    impl CatalogPort for FakeDb {
        fn database_info(&mut self) -> Result<Option<DatabaseInfo>> {
            Ok(None)
        }
        fn list_domains(&mut self) -> Result<Vec<DomainRow>> {
            Ok(vec![])
        }
        fn list_tables(&mut self) -> Result<Vec<String>> {
            Ok(vec![])
        }
        fn list_table_columns(&mut self, _table: &str) -> Result<Vec<ColumnRow>> {
            Ok(vec![])
        }
        fn list_primary_key_columns(&mut self, _table: &str) -> Result<Vec<String>> {
            Ok(vec![])
        }
        fn list_constraints(&mut self, _table: &str) -> Result<Vec<ConstraintRow>> {
            Ok(vec![])
        }
        fn resolve_foreign_key_target(
            &mut self,
            _constraint: &str,
        ) -> Result<Option<ForeignKeyTarget>> {
            Ok(None)
        }
        fn list_procedures(&mut self) -> Result<Vec<ProcedureRow>> {
            Ok(vec![])
        }
        fn list_procedure_parameters(&mut self, _procedure: &str) -> Result<Vec<ParameterRow>> {
            Ok(vec![])
        }
        fn object_exists(&mut self, kind: ObjectKind, name: &str) -> Result<bool> {
            Ok(self
                .existing
                .iter()
                .any(|(k, n)| *k == kind && n.eq_ignore_ascii_case(name)))
        }
    }

    #[test]
    fn test_rewrite_is_pure_and_idempotent() {
        let stmt = "CREATE PROCEDURE ADD_ORDER (P INTEGER)\nAS\nBEGIN\nEND";
        let once = rewrite_redefinable(stmt);
        assert_eq!(once, "CREATE OR ALTER PROCEDURE ADD_ORDER (P INTEGER)\nAS\nBEGIN\nEND");
        assert_eq!(rewrite_redefinable(&once), once);

        let trigger = "CREATE TRIGGER TR_AUDIT FOR ORDERS";
        assert_eq!(
            rewrite_redefinable(trigger),
            "CREATE OR ALTER TRIGGER TR_AUDIT FOR ORDERS"
        );
    }

    #[test]
    fn test_rewrite_leaves_other_statements_alone() {
        let stmt = "CREATE TABLE T (X INTEGER)";
        assert_eq!(rewrite_redefinable(stmt), stmt);
        let domain = "CREATE DOMAIN D AS INTEGER";
        assert_eq!(rewrite_redefinable(domain), domain);
    }

    #[test]
    fn test_creation_target_extraction() {
        assert_eq!(
            creation_target("CREATE TABLE CUSTOMERS (ID INTEGER)"),
            Some((ObjectKind::Table, "CUSTOMERS"))
        );
        assert_eq!(
            creation_target("create domain d_qty as integer"),
            Some((ObjectKind::Domain, "d_qty"))
        );
        assert_eq!(
            creation_target("CREATE TABLE CUSTOMERS(ID INTEGER)"),
            Some((ObjectKind::Table, "CUSTOMERS"))
        );
        assert_eq!(creation_target("CREATE PROCEDURE P (X INTEGER)"), None);
        assert_eq!(creation_target("INSERT INTO T VALUES (1)"), None);
    }

    #[test]
    fn test_statement_failure_does_not_stop_the_file() {
        let mut db = FakeDb {
            fail_on: vec!["BROKEN".to_string()],
            ..FakeDb::default()
        };
        let mut report = SyncReport::new("r");
        let script = indoc! {r#"
            CREATE TABLE A (X INTEGER);
            CREATE TABLE BROKEN (;
            CREATE TABLE B (Y INTEGER);
        "#};

        run_script_text(&mut db, script, "tables.sql", SyncMode::Build, &mut report);

        assert_eq!(db.executed.len(), 2);
        assert!(db.executed[1].contains("CREATE TABLE B"));
        let outcome = &report.files[0];
        assert!(!outcome.is_ok());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("CREATE TABLE BROKEN"));
        assert!(outcome.errors[0].contains("token unknown"));
    }

    #[test]
    fn test_update_skips_existing_table_with_warning() {
        let mut db = FakeDb {
            existing: vec![(ObjectKind::Table, "CUSTOMERS".to_string())],
            ..FakeDb::default()
        };
        let mut report = SyncReport::new("r");
        let script = "CREATE TABLE CUSTOMERS (ID INTEGER);\nCREATE TABLE ORDERS (ID INTEGER);";

        run_script_text(&mut db, script, "tables.sql", SyncMode::Update, &mut report);

        assert_eq!(db.executed.len(), 1);
        assert!(db.executed[0].contains("ORDERS"));
        let outcome = &report.files[0];
        assert!(outcome.is_ok());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("CUSTOMERS"));
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_update_rewrites_procedures_before_execution() {
        let mut db = FakeDb::default();
        let mut report = SyncReport::new("r");
        let script = indoc! {r#"
            SET TERM ^ ;
            CREATE PROCEDURE NOOP
            AS
            BEGIN
              EXIT;
            END^
            SET TERM ; ^
        "#};

        run_script_text(&mut db, script, "procedures.sql", SyncMode::Update, &mut report);

        assert_eq!(db.executed.len(), 1);
        assert!(db.executed[0].starts_with("CREATE OR ALTER PROCEDURE NOOP"));
    }

    #[test]
    fn test_build_mode_never_consults_the_catalog() {
        let mut db = FakeDb {
            existing: vec![(ObjectKind::Table, "CUSTOMERS".to_string())],
            ..FakeDb::default()
        };
        let mut report = SyncReport::new("r");

        run_script_text(
            &mut db,
            "CREATE TABLE CUSTOMERS (ID INTEGER);",
            "tables.sql",
            SyncMode::Build,
            &mut report,
        );

        // In build mode the statement executes even though the fake claims
        // the table exists.
        assert_eq!(db.executed.len(), 1);
        assert!(report.files[0].warnings.is_empty());
    }
}
