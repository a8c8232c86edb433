use super::port::FieldType;

// Engine type codes as stored in the catalog's field definitions.
pub const TYPE_SMALLINT: i16 = 7;
pub const TYPE_INTEGER: i16 = 8;
pub const TYPE_FLOAT: i16 = 10;
pub const TYPE_DATE: i16 = 12;
pub const TYPE_TIME: i16 = 13;
pub const TYPE_CHAR: i16 = 14;
pub const TYPE_INT64: i16 = 16;
pub const TYPE_DOUBLE: i16 = 27;
pub const TYPE_TIMESTAMP: i16 = 35;
pub const TYPE_VARCHAR: i16 = 37;

/// Sub-type flag distinguishing exact numerics stored in an INT64 field.
pub const SUB_TYPE_DECIMAL: i16 = 2;

/// Map an engine type code plus length/precision/scale to a canonical SQL
/// type string.
///
/// Total and deterministic: every code maps to exactly one string, and an
/// unrecognized code maps to a deliberately-invalid `UNKNOWN(length)`
/// placeholder rather than a silent guess.
pub fn map_field_type(field: &FieldType) -> String {
    match field.code {
        TYPE_SMALLINT => "SMALLINT".to_string(),
        TYPE_INTEGER => "INTEGER".to_string(),
        TYPE_FLOAT => "FLOAT".to_string(),
        TYPE_DATE => "DATE".to_string(),
        TYPE_TIME => "TIME".to_string(),
        TYPE_CHAR => format!("CHAR({})", field.length),
        TYPE_VARCHAR => format!("VARCHAR({})", field.length),
        TYPE_INT64 => match (field.precision, field.scale) {
            // A precision with a negative scale marks an exact numeric; the
            // sub-type flag decides which spelling the definition used.
            (Some(precision), Some(scale)) if scale < 0 => {
                if field.sub_type == Some(SUB_TYPE_DECIMAL) {
                    format!("DECIMAL({},{})", precision, -scale)
                } else {
                    format!("NUMERIC({},{})", precision, -scale)
                }
            }
            _ => "BIGINT".to_string(),
        },
        TYPE_DOUBLE => "DOUBLE PRECISION".to_string(),
        TYPE_TIMESTAMP => "TIMESTAMP".to_string(),
        _ => format!("UNKNOWN({})", field.length),
    }
}
