//! Shared test fixtures: an in-memory engine standing in for a live server.

#![allow(dead_code)]

use fbmg::catalog::{
    CatalogPort, ColumnRow, ConstraintRow, DatabaseInfo, DomainRow, ForeignKeyTarget, ObjectKind,
    ParameterRow, ProcedureRow,
};
use fbmg::db::{CreateDatabaseOptions, DatabaseProvider, StatementExecutor};
use fbmg::error::{FbmgError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct EngineState {
    // Execution side
    pub executed: Vec<String>,
    pub fail_on: Vec<String>,
    pub existing: Vec<(ObjectKind, String)>,
    pub created: Vec<CreateDatabaseOptions>,
    pub fail_create: bool,

    // Catalog side
    pub info: Option<DatabaseInfo>,
    pub domains: Vec<DomainRow>,
    pub tables: Vec<String>,
    pub columns: HashMap<String, Vec<ColumnRow>>,
    pub pk_columns: HashMap<String, Vec<String>>,
    pub constraints: HashMap<String, Vec<ConstraintRow>>,
    pub fk_targets: HashMap<String, ForeignKeyTarget>,
    pub procedures: Vec<ProcedureRow>,
    pub parameters: HashMap<String, Vec<ParameterRow>>,
}

/// A fake open connection; clones share the same engine state.
#[derive(Default, Clone)]
pub struct FakeDatabase {
    pub state: Rc<RefCell<EngineState>>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.borrow().executed.clone()
    }
}

impl StatementExecutor for FakeDatabase {
    fn execute_statement(&mut self, sql: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_on.iter().any(|marker| sql.contains(marker)) {
            return Err(FbmgError::Database(format!(
                "Dynamic SQL Error near '{}'",
                sql.chars().take(20).collect::<String>()
            )));
        }
        state.executed.push(sql.to_string());
        Ok(())
    }
}

impl CatalogPort for FakeDatabase {
    fn database_info(&mut self) -> Result<Option<DatabaseInfo>> {
        Ok(self.state.borrow().info.clone())
    }

    fn list_domains(&mut self) -> Result<Vec<DomainRow>> {
        Ok(self.state.borrow().domains.clone())
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        Ok(self.state.borrow().tables.clone())
    }

    fn list_table_columns(&mut self, table: &str) -> Result<Vec<ColumnRow>> {
        Ok(self
            .state
            .borrow()
            .columns
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    fn list_primary_key_columns(&mut self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .state
            .borrow()
            .pk_columns
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    fn list_constraints(&mut self, table: &str) -> Result<Vec<ConstraintRow>> {
        Ok(self
            .state
            .borrow()
            .constraints
            .get(table)
            .cloned()
            .unwrap_or_default())
    }

    fn resolve_foreign_key_target(
        &mut self,
        constraint: &str,
    ) -> Result<Option<ForeignKeyTarget>> {
        Ok(self.state.borrow().fk_targets.get(constraint).cloned())
    }

    fn list_procedures(&mut self) -> Result<Vec<ProcedureRow>> {
        Ok(self.state.borrow().procedures.clone())
    }

    fn list_procedure_parameters(&mut self, procedure: &str) -> Result<Vec<ParameterRow>> {
        Ok(self
            .state
            .borrow()
            .parameters
            .get(procedure)
            .cloned()
            .unwrap_or_default())
    }

    fn object_exists(&mut self, kind: ObjectKind, name: &str) -> Result<bool> {
        Ok(self
            .state
            .borrow()
            .existing
            .iter()
            .any(|(k, n)| *k == kind && n.eq_ignore_ascii_case(name)))
    }
}

/// Fake engine factory; connections created by it share its state.
#[derive(Default, Clone)]
pub struct FakeProvider {
    pub state: Rc<RefCell<EngineState>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.borrow().executed.clone()
    }

    pub fn created(&self) -> Vec<CreateDatabaseOptions> {
        self.state.borrow().created.clone()
    }
}

impl DatabaseProvider for FakeProvider {
    type Database = FakeDatabase;

    fn create_database(&self, options: &CreateDatabaseOptions) -> Result<Self::Database> {
        let mut state = self.state.borrow_mut();
        if state.fail_create {
            return Err(FbmgError::DatabaseCreation(
                "I/O error during CreateFile".to_string(),
            ));
        }
        state.created.push(options.clone());
        Ok(FakeDatabase {
            state: Rc::clone(&self.state),
        })
    }
}
