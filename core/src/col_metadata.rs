use definitions::{Nullability, SqlDataType};

// Metadata information for a column of the result set.
// The information is used when reporting column information from
// SQLDescribeCol and when converting cell data to the targeted C type.
#[derive(Clone, Debug)]
pub struct ColMetadata {
    pub col_name: String,
    pub table_name: String,
    pub type_name: String,
    pub sql_type: SqlDataType,
    pub nullability: Nullability,
    pub display_size: Option<u16>,
    pub precision: Option<u16>,
    pub scale: Option<u16>,
}

impl ColMetadata {
    pub fn new(
        table_name: String,
        col_name: String,
        sql_type: SqlDataType,
        nullability: Nullability,
    ) -> ColMetadata {
        let (type_name, display_size, precision) = match sql_type {
            SqlDataType::SQL_INTEGER => ("int", Some(11), Some(10)),
            SqlDataType::SQL_BIGINT => ("bigint", Some(20), Some(19)),
            SqlDataType::SQL_SMALLINT => ("smallint", Some(6), Some(5)),
            _ => ("varchar", None, None),
        };
        ColMetadata {
            col_name,
            table_name,
            type_name: type_name.to_string(),
            sql_type,
            nullability,
            display_size,
            precision,
            scale: None,
        }
    }
}

/// One column of the fixed per-table part catalog.
#[derive(Debug)]
pub struct PartColumn {
    pub name: &'static str,
    pub sql_type: SqlDataType,
}

/// The column catalog every category table exposes. `SELECT *` expands to
/// these columns in this order; `SQLColumns` enumerates them; they are the
/// only legal `WHERE` columns.
pub const PART_COLUMNS: &[PartColumn] = &[
    PartColumn {
        name: "pk",
        sql_type: SqlDataType::SQL_INTEGER,
    },
    PartColumn {
        name: "IPN",
        sql_type: SqlDataType::SQL_VARCHAR,
    },
];

/// Case-insensitive catalog lookup.
pub fn part_column(name: &str) -> Option<&'static PartColumn> {
    PART_COLUMNS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn catalog_lookup_ignores_case() {
        assert!(part_column("pk").is_some());
        assert!(part_column("PK").is_some());
        assert!(part_column("ipn").is_some());
        assert!(part_column("qqq").is_none());
    }

    #[test]
    fn catalog_has_two_columns() {
        assert_eq!(2, PART_COLUMNS.len());
    }
}
