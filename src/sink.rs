use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::db::{self, SheetRow};

/// Reply body; failures are reported here, never as an error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SinkResponse {
    fn ok() -> Self {
        SinkResponse {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        SinkResponse {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

// Absent, null, false, 0 and "" all become empty cells. Other scalars are stringified.
fn cell(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn sheet_row(body: &Value) -> SheetRow {
    SheetRow {
        name: cell(body, "name"),
        company: cell(body, "company"),
        position: cell(body, "jobTitle"),
        location: cell(body, "location"),
        date: cell(body, "date"),
        profile_url: cell(body, "profileUrl"),
    }
}

/// Append one posted payload as a row: Name, Company, Position, Location, Date, Profile-URL.
pub fn do_post(conn: &Connection, body: &str) -> SinkResponse {
    match append(conn, body) {
        Ok(id) => {
            info!(row = id, "row appended");
            SinkResponse::ok()
        }
        Err(e) => {
            warn!("append failed: {:#}", e);
            SinkResponse::failed(format!("{:#}", e))
        }
    }
}

fn append(conn: &Connection, body: &str) -> Result<i64> {
    let body: Value = serde_json::from_str(body)?;
    db::append_row(conn, &sheet_row(&body))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_column_order() {
        let conn = db::memory();
        let body = r#"{"name":"Jane Doe","profileUrl":"https://www.linkedin.com/in/jane/",
                       "jobTitle":"Engineer","company":"Acme","location":"Lisbon","date":"Jan 5, 2024"}"#;
        assert_eq!(do_post(&conn, body), SinkResponse::ok());

        let rows = db::fetch_rows(&conn, None).unwrap();
        assert_eq!(
            rows,
            vec![SheetRow {
                name: "Jane Doe".into(),
                company: "Acme".into(),
                position: "Engineer".into(),
                location: "Lisbon".into(),
                date: "Jan 5, 2024".into(),
                profile_url: "https://www.linkedin.com/in/jane/".into(),
            }]
        );
    }

    #[test]
    fn missing_and_null_fields_are_blank() {
        let conn = db::memory();
        let resp = do_post(&conn, r#"{"name":"Only Name","company":null}"#);
        assert!(resp.success);
        let row = &db::fetch_rows(&conn, None).unwrap()[0];
        assert_eq!(row.name, "Only Name");
        assert_eq!(row.company, "");
        assert_eq!(row.profile_url, "");
    }

    #[test]
    fn scalar_fields_are_stringified() {
        let conn = db::memory();
        let resp = do_post(&conn, r#"{"name":42,"company":true,"jobTitle":0,"location":false}"#);
        assert!(resp.success);
        let row = &db::fetch_rows(&conn, None).unwrap()[0];
        assert_eq!(row.name, "42");
        assert_eq!(row.company, "true");
        assert_eq!(row.position, "");
        assert_eq!(row.location, "");
    }

    #[test]
    fn non_object_body_appends_blank_row() {
        let conn = db::memory();
        assert!(do_post(&conn, r#""hello""#).success);
        let rows = db::fetch_rows(&conn, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "");
        assert_eq!(rows[0].profile_url, "");
    }

    #[test]
    fn malformed_body_reports_error() {
        let conn = db::memory();
        let resp = do_post(&conn, "not json");
        assert!(!resp.success);
        assert!(resp.error.is_some());
        assert!(db::fetch_rows(&conn, None).unwrap().is_empty());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }

    #[test]
    fn success_omits_error_field() {
        let json = serde_json::to_string(&SinkResponse::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
