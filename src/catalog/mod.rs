pub mod introspect;
pub mod port;
pub mod types;

pub use introspect::{
    extract_domains, extract_header, extract_procedures, extract_tables, trim_leading_keyword,
};
pub use port::{
    CatalogPort, ColumnRow, ConstraintKind, ConstraintRow, DatabaseInfo, DomainRow, FieldType,
    ForeignKeyTarget, ObjectKind, ParamDirection, ParameterRow, ProcedureRow,
};
pub use types::map_field_type;
