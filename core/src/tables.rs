use crate::{categories::CategoryIndex, col_metadata::ColMetadata, err::Result, InventreeStatement};
use definitions::{Nullability, SqlDataType};
use serde_json::Value;

/// Result set for SQLTables: one row per category pathstring, in the order
/// the remote returned them. Catalog, schema and remarks are always NULL and
/// every table is of type TABLE.
#[derive(Debug)]
pub struct CategoryTables {
    metadata: Vec<ColMetadata>,
    rows: Vec<Vec<Value>>,
    current: Option<usize>,
}

impl CategoryTables {
    /// Lists categories as tables. A non-empty `table_name` filter keeps only
    /// the exact match; an unknown name yields an empty result set rather
    /// than an error.
    pub fn list_tables(categories: &CategoryIndex, table_name: Option<&str>) -> CategoryTables {
        let rows = categories
            .pathstrings()
            .filter(|pathstring| table_name.map_or(true, |filter| filter == *pathstring))
            .map(|pathstring| {
                vec![
                    Value::Null,
                    Value::Null,
                    Value::from(pathstring),
                    Value::from("TABLE"),
                    Value::Null,
                ]
            })
            .collect();
        CategoryTables {
            metadata: metadata(),
            rows,
            current: None,
        }
    }
}

fn metadata() -> Vec<ColMetadata> {
    [
        ("TABLE_CAT", Nullability::SQL_NULLABLE),
        ("TABLE_SCHEM", Nullability::SQL_NULLABLE),
        ("TABLE_NAME", Nullability::SQL_NO_NULLS),
        ("TABLE_TYPE", Nullability::SQL_NO_NULLS),
        ("REMARKS", Nullability::SQL_NULLABLE),
    ]
    .map(|(name, nullability)| {
        ColMetadata::new(
            String::new(),
            name.to_string(),
            SqlDataType::SQL_VARCHAR,
            nullability,
        )
    })
    .to_vec()
}

impl InventreeStatement for CategoryTables {
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
