use crate::{
    col_metadata::{part_column, ColMetadata, PartColumn, PART_COLUMNS},
    conn::InventreeConnection,
    err::{Error, PartsError, Result},
    sql::{Filter, Literal, Projection, SelectQuery},
    stmt::InventreeStatement,
};
use definitions::Nullability;
use serde::Deserialize;
use serde_json::{Map, Value};

type PartObject = Map<String, Value>;

// Response shape of /api/part/<pk>/metadata/.
#[derive(Deserialize)]
struct PartMetadata {
    metadata: Option<Map<String, Value>>,
}

/// The materialized result of a part query: column metadata plus rows in the
/// order the remote returned them.
#[derive(Debug)]
pub struct PartsQuery {
    metadata: Vec<ColMetadata>,
    rows: Vec<Vec<Value>>,
    current: Option<usize>,
}

impl PartsQuery {
    /// Plans and runs the query against the inventory API.
    ///
    /// A filter on `pk` fetches the part resource directly, together with
    /// its metadata and parameters. Any other catalog column fetches the
    /// category's part list and filters client-side. Filter columns are
    /// checked before the table name is resolved.
    pub fn execute(conn: &InventreeConnection, query: &SelectQuery) -> Result<PartsQuery> {
        let projection = projected_columns(&query.columns)?;
        if let Some(filter) = &query.filter {
            if part_column(&filter.column).is_none() {
                return Err(PartsError::InvalidFilterColumn(filter.column.clone()).into());
            }
        }
        let category = conn
            .categories
            .resolve(&query.table)
            .ok_or_else(|| PartsError::UnknownCategory(query.table.clone()))?;

        let parts = match &query.filter {
            Some(filter) if filter.column.eq_ignore_ascii_case("pk") => {
                let pk = match filter.value {
                    Literal::Integer(pk) => pk,
                    Literal::String(_) => return Err(PartsError::PkNotANumber.into()),
                };
                vec![fetch_single_part(conn, pk)?]
            }
            Some(filter) => fetch_part_list(conn, category)?
                .into_iter()
                .filter(|part| matches_filter(part, filter))
                .collect(),
            None => fetch_part_list(conn, category)?,
        };

        let mut rows = Vec::with_capacity(parts.len());
        for part in &parts {
            rows.push(project_row(part, &projection)?);
        }
        let metadata = projection
            .iter()
            .map(|column| {
                ColMetadata::new(
                    query.table.clone(),
                    column.name.to_string(),
                    column.sql_type,
                    Nullability::SQL_NULLABLE,
                )
            })
            .collect();
        Ok(PartsQuery {
            metadata,
            rows,
            current: None,
        })
    }
}

fn projected_columns(projection: &Projection) -> Result<Vec<&'static PartColumn>> {
    match projection {
        Projection::All => Ok(PART_COLUMNS.iter().collect()),
        Projection::Columns(names) => names
            .iter()
            .map(|name| {
                part_column(name).ok_or_else(|| Error::Syntax(format!("* expected, got: {name}")))
            })
            .collect(),
    }
}

fn fetch_part_list(conn: &InventreeConnection, category: i64) -> Result<Vec<PartObject>> {
    let parts = conn
        .client
        .get_json("/api/part/", &[("category", category.to_string())])
        .map_err(PartsError::from)?;
    Ok(parts)
}

fn fetch_single_part(conn: &InventreeConnection, pk: i64) -> Result<PartObject> {
    let mut part: PartObject = conn
        .client
        .get_json(&format!("/api/part/{pk}/"), &[])
        .map_err(PartsError::from)?;
    let metadata: PartMetadata = conn
        .client
        .get_json(&format!("/api/part/{pk}/metadata/"), &[])
        .map_err(PartsError::from)?;
    let parameters: Vec<Value> = conn
        .client
        .get_json("/api/part/parameter/", &[("part", pk.to_string())])
        .map_err(PartsError::from)?;
    // merge the per-part resources into a single row object
    if let Some(metadata) = metadata.metadata {
        part.insert("metadata".to_string(), Value::Object(metadata));
    }
    part.insert("parameters".to_string(), Value::Array(parameters));
    Ok(part)
}

fn matches_filter(part: &PartObject, filter: &Filter) -> bool {
    let column = match part_column(&filter.column) {
        Some(column) => column,
        None => return false,
    };
    match (part.get(column.name), &filter.value) {
        (Some(Value::String(have)), Literal::String(want)) => have == want,
        (Some(Value::Number(have)), Literal::Integer(want)) => have.as_i64() == Some(*want),
        _ => false,
    }
}

fn project_row(part: &PartObject, projection: &[&'static PartColumn]) -> Result<Vec<Value>> {
    let pk = coerce_pk(part.get("pk"))?;
    Ok(projection
        .iter()
        .map(|column| {
            if column.name == "pk" {
                Value::from(pk)
            } else {
                part.get(column.name).cloned().unwrap_or(Value::Null)
            }
        })
        .collect())
}

fn coerce_pk(value: Option<&Value>) -> std::result::Result<i64, PartsError> {
    match value {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| PartsError::PkNotAnInt64(n.clone())),
        _ => Err(PartsError::PkNotANumber),
    }
}

impl InventreeStatement for PartsQuery {
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

#[cfg(test)]
mod unit {
    use super::*;
    use crate::{categories::CategoryIndex, client::ApiClient, odbc_uri::Kom2Uri, parse_select};

    const CATEGORIES_JSON: &str = r#"
        [
            {"pk": 6, "name": "Capacitors", "parent": null, "pathstring": "Capacitors"},
            {"pk": 8, "name": "Aluminium", "parent": 6, "pathstring": "Capacitors/Aluminium"},
            {"pk": 59, "name": "Resistors", "parent": null, "pathstring": "Resistors"}
        ]"#;

    const PARTS_JSON: &str = r#"
        [
            {"pk": 16, "IPN": "RES-000014-00", "name": "0R resistor 0% SMD 0805",
             "description": "SMD-Resistor, 0805, 0 Ohm, 0%", "category": 59},
            {"pk": 37, "IPN": "RES-000037-00", "name": "100 k SMD 0805 0.125 W 1 %",
             "description": "Cermet resistor", "category": 59},
            {"pk": 18, "IPN": "CAP-000015-00", "name": "100nF Ceramic Capacitor",
             "description": "MLCC 100nF 50V", "category": 7},
            {"pk": 30, "IPN": "CAP-000030-00", "name": "100uF 35V Aluminium",
             "description": "Electrolytic", "category": 8}
        ]"#;

    fn connection(server: &mockito::ServerGuard) -> InventreeConnection {
        let options = Kom2Uri::parse(&format!("server={};apitoken=asdf", server.url()))
            .into_options()
            .unwrap();
        InventreeConnection {
            client: ApiClient::connect(&options).unwrap(),
            categories: CategoryIndex::new(serde_json::from_str(CATEGORIES_JSON).unwrap()),
        }
    }

    fn execute(conn: &InventreeConnection, sql: &str) -> Result<PartsQuery> {
        PartsQuery::execute(conn, &parse_select(sql).unwrap())
    }

    #[test]
    fn unconditional_select() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::UrlEncoded("category".into(), "59".into()))
            .with_body(PARTS_JSON)
            .create();

        let conn = connection(&server);
        let mut query = execute(&conn, "SELECT * FROM Resistors").unwrap();
        assert_eq!(4, query.num_rows());
        assert_eq!(2, query.get_resultset_metadata().len());

        assert!(query.next().unwrap());
        assert_eq!(Some(Value::from(16)), query.get_value(1).unwrap());
        assert_eq!(
            Some(Value::from("RES-000014-00")),
            query.get_value(2).unwrap()
        );
        for _ in 0..3 {
            assert!(query.next().unwrap());
        }
        assert!(!query.next().unwrap());
    }

    #[test]
    fn unknown_table() {
        let server = mockito::Server::new();
        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Pizzas").unwrap_err();
        assert_eq!("HY000", err.get_sql_state());
        let message = format!("{err}");
        assert!(message.contains("Unable to fetch parts"));
        assert!(message.contains("Category does not exist"));
    }

    #[test]
    fn invalid_filter_column_wins_over_unknown_table() {
        let server = mockito::Server::new();
        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Pizzas WHERE qqq = 1").unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("Unable to fetch parts"));
        assert!(message.contains("Invalid filter column"));
    }

    #[test]
    fn list_fetch_failure() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create();

        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Resistors").unwrap_err();
        assert_eq!("HY000", err.get_sql_state());
        assert!(format!("{err}").contains("Unable to fetch parts"));
    }

    #[test]
    fn select_by_pk_merges_part_resources() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/30/")
            .with_body(r#"{"pk": 30, "IPN": "CAP-000030-00", "category": 8}"#)
            .create();
        server
            .mock("GET", "/api/part/30/metadata/")
            .with_body(r#"{"metadata": {"datasheet": "CAP-000030.pdf"}}"#)
            .create();
        server
            .mock("GET", "/api/part/parameter/")
            .match_query(mockito::Matcher::UrlEncoded("part".into(), "30".into()))
            .with_body(r#"[{"pk": 1, "part": 30, "data": "6V"}]"#)
            .create();

        let conn = connection(&server);
        let mut query = execute(&conn, "SELECT * FROM Resistors WHERE pk = 30").unwrap();
        assert_eq!(1, query.num_rows());
        assert!(query.next().unwrap());
        assert_eq!(Some(Value::from(30)), query.get_value(1).unwrap());
        assert!(!query.next().unwrap());
    }

    #[test]
    fn select_by_pk_requires_every_resource() {
        // part itself resolves, but metadata and parameters are missing
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/1/")
            .with_body(r#"{"pk": 1, "IPN": "X", "category": 59}"#)
            .create();

        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Resistors WHERE pk = 1").unwrap_err();
        assert!(format!("{err}").contains("Unable to fetch parts"));
    }

    #[test]
    fn select_by_pk_with_string_literal() {
        let server = mockito::Server::new();
        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Resistors WHERE pk = 'thirty'").unwrap_err();
        assert!(format!("{err}").contains("'pk' is not a number"));
    }

    #[test]
    fn client_side_filter_on_ipn() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::Any)
            .with_body(PARTS_JSON)
            .create();

        let conn = connection(&server);
        let mut query =
            execute(&conn, "SELECT * FROM Resistors WHERE IPN = 'RES-000037-00'").unwrap();
        assert_eq!(1, query.num_rows());
        assert!(query.next().unwrap());
        assert_eq!(Some(Value::from(37)), query.get_value(1).unwrap());
    }

    #[test]
    fn string_pk_is_rejected() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"[{"pk": "sixteen", "IPN": "RES-000014-00"}]"#)
            .create();

        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Resistors").unwrap_err();
        let message = format!("{err}");
        assert!(message.contains("Unable to fetch parts"));
        assert!(message.contains("'pk' is not a number"));
    }

    #[test]
    fn fractional_pk_is_rejected() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"[{"pk": 16.1, "IPN": "RES-000014-00"}]"#)
            .create();

        let conn = connection(&server);
        let err = execute(&conn, "SELECT * FROM Resistors").unwrap_err();
        assert!(format!("{err}").contains("was unable to convert 'pk' to an int64"));
    }

    #[test]
    fn explicit_projection_order() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/")
            .match_query(mockito::Matcher::Any)
            .with_body(PARTS_JSON)
            .create();

        let conn = connection(&server);
        let mut query = execute(&conn, "SELECT IPN, pk FROM Resistors").unwrap();
        let names: Vec<String> = query
            .get_resultset_metadata()
            .iter()
            .map(|m| m.col_name.clone())
            .collect();
        assert_eq!(vec!["IPN".to_string(), "pk".to_string()], names);
        assert!(query.next().unwrap());
        assert_eq!(
            Some(Value::from("RES-000014-00")),
            query.get_value(1).unwrap()
        );
        assert_eq!(Some(Value::from(16)), query.get_value(2).unwrap());
    }
}
