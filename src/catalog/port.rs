use crate::error::Result;

/// Kinds of user-defined schema objects the synchronization engine cares
/// about. Used for existence checks during idempotent reapplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Domain,
    Table,
    Procedure,
    Trigger,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Domain => "domain",
            ObjectKind::Table => "table",
            ObjectKind::Procedure => "procedure",
            ObjectKind::Trigger => "trigger",
        }
    }
}

/// Storage-level facts about the connected database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub path: String,
    pub page_size: u32,
    pub charset: String,
}

/// Raw type description of a catalog field, as stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldType {
    pub code: i16,
    pub length: i16,
    pub precision: Option<i16>,
    pub scale: Option<i16>,
    pub sub_type: Option<i16>,
}

#[derive(Debug, Clone)]
pub struct DomainRow {
    pub name: String,
    pub field: FieldType,
    /// Verbatim default source, keyword included (e.g. `DEFAULT 0`).
    pub default_source: Option<String>,
    /// Verbatim check source, keyword included (e.g. `CHECK (VALUE > 0)`).
    pub check_source: Option<String>,
    /// Presence of the catalog null-flag marker, not its stored value.
    pub not_null: bool,
}

#[derive(Debug, Clone)]
pub struct ColumnRow {
    pub name: String,
    /// The field definition this column draws its type from. A name not
    /// prefixed with the engine-internal marker is a user domain reference.
    pub field_source: String,
    pub field: FieldType,
    pub not_null: bool,
    pub default_source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
}

#[derive(Debug, Clone)]
pub struct ConstraintRow {
    pub name: String,
    pub kind: ConstraintKind,
    pub column: String,
    /// For foreign keys: the name of the referenced (unique/primary)
    /// constraint, resolvable via [`CatalogPort::resolve_foreign_key_target`].
    pub ref_constraint: Option<String>,
    /// For check constraints: the constraint source text.
    pub check_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyTarget {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    Input,
    Output,
}

#[derive(Debug, Clone)]
pub struct ProcedureRow {
    pub name: String,
    /// Verbatim procedure body source.
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct ParameterRow {
    pub name: String,
    pub direction: ParamDirection,
    pub field_source: String,
    pub field: FieldType,
}

/// Narrow capability interface over the engine's system catalog.
///
/// The concrete system-table names and joins live behind this trait (see
/// `db::firebird` for the real adapter), keeping the introspector and the
/// executor's existence checks engine-agnostic and testable against a fake.
/// All operations are read-only against the source database. Implementations
/// return only user-defined (non-system) objects.
pub trait CatalogPort {
    /// Storage path, page size and character set of the connected database.
    /// `None` when the engine exposes no such facts; absence is not an error.
    fn database_info(&mut self) -> Result<Option<DatabaseInfo>>;

    fn list_domains(&mut self) -> Result<Vec<DomainRow>>;

    /// Names of non-system, non-view relations.
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Columns of `table` in physical position order.
    fn list_table_columns(&mut self, table: &str) -> Result<Vec<ColumnRow>>;

    /// Column names covered by `table`'s primary-key constraint, via the
    /// constraint's indexed segments.
    fn list_primary_key_columns(&mut self, table: &str) -> Result<Vec<String>>;

    fn list_constraints(&mut self, table: &str) -> Result<Vec<ConstraintRow>>;

    /// Follow a foreign key's referenced constraint to its owning table and
    /// column.
    fn resolve_foreign_key_target(&mut self, constraint: &str)
        -> Result<Option<ForeignKeyTarget>>;

    fn list_procedures(&mut self) -> Result<Vec<ProcedureRow>>;

    /// Parameters of `procedure`, ordered by direction then position.
    fn list_procedure_parameters(&mut self, procedure: &str) -> Result<Vec<ParameterRow>>;

    /// Whether a user-defined object of the given kind and name exists.
    /// Name comparison is case-insensitive, matching the engine's rules.
    fn object_exists(&mut self, kind: ObjectKind, name: &str) -> Result<bool>;
}
