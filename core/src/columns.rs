use crate::{
    col_metadata::{ColMetadata, PART_COLUMNS},
    err::Result,
    InventreeStatement,
};
use definitions::{Nullability, SqlDataType};
use serde_json::Value;

/// Result set for SQLColumns: the fixed part-column catalog, one row per
/// column. Every category table shares the same catalog, so the requested
/// table name is echoed but never consulted.
#[derive(Debug)]
pub struct TableColumns {
    metadata: Vec<ColMetadata>,
    rows: Vec<Vec<Value>>,
    current: Option<usize>,
}

impl TableColumns {
    pub fn list_columns(table_name: &str) -> TableColumns {
        let rows = PART_COLUMNS
            .iter()
            .map(|column| {
                vec![
                    Value::Null,
                    Value::Null,
                    Value::from(table_name),
                    Value::from(column.name),
                    Value::from(column.sql_type as i64),
                ]
            })
            .collect();
        TableColumns {
            metadata: metadata(),
            rows,
            current: None,
        }
    }
}

fn metadata() -> Vec<ColMetadata> {
    [
        ("TABLE_CAT", SqlDataType::SQL_VARCHAR, Nullability::SQL_NULLABLE),
        ("TABLE_SCHEM", SqlDataType::SQL_VARCHAR, Nullability::SQL_NULLABLE),
        ("TABLE_NAME", SqlDataType::SQL_VARCHAR, Nullability::SQL_NO_NULLS),
        ("COLUMN_NAME", SqlDataType::SQL_VARCHAR, Nullability::SQL_NO_NULLS),
        ("DATA_TYPE", SqlDataType::SQL_SMALLINT, Nullability::SQL_NO_NULLS),
    ]
    .map(|(name, sql_type, nullability)| {
        ColMetadata::new(String::new(), name.to_string(), sql_type, nullability)
    })
    .to_vec()
}

impl InventreeStatement for TableColumns {
    fn next(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next);
        Ok(next < self.rows.len())
    }

    fn get_value(&self, col_index: u16) -> Result<Option<Value>> {
        let cell = self
            .current
            .and_then(|i| self.rows.get(i))
            .and_then(|row| (col_index as usize).checked_sub(1).and_then(|i| row.get(i)));
        Ok(cell.filter(|v| !v.is_null()).cloned())
    }

    fn get_resultset_metadata(&self) -> &[ColMetadata] {
        &self.metadata
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
