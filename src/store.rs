//! Everything directly interfacing with the hosted store.
//!
//! The store speaks the PostgREST dialect: one route per table under
//! `/rest/v1/`, filters as query parameters (`col=eq.v`, `col=in.(a,b)`),
//! and JSON arrays of row objects in both directions. Every request carries
//! the project key twice, as `apikey` and as a bearer token.

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{Config, StoreConfig};
use crate::roster::StaffRecord;

/// Create a Client that sends the store credential headers on each request.
pub fn create_client(store: &StoreConfig) -> Result<reqwest::Client, StoreError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );
    let api_key =
        header::HeaderValue::from_str(&store.key).map_err(StoreError::BadCredential)?;
    headers.insert("apikey", api_key);
    let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {}", store.key))
        .map_err(StoreError::BadCredential)?;
    auth_value.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth_value);
    reqwest::Client::builder()
        .default_headers(headers)
        .use_rustls_tls()
        .build()
        .map_err(StoreError::CannotCreateClient)
}

/// Something went wrong talking to the store.
///
/// The first payload of the request-shaped variants names the operation that
/// failed, so a flattened diagnostic still says which step broke.
#[derive(Debug)]
pub enum StoreError {
    BadCredential(header::InvalidHeaderValue),
    CannotCreateClient(reqwest::Error),
    NoResponse(&'static str, reqwest::Error),
    Utf8Decode(&'static str),
    Deserialize(&'static str),
    Api(&'static str, reqwest::StatusCode, String),
}
impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::BadCredential(e) => {
                write!(f, "The store key cannot be sent as a header: {e}.")
            }
            Self::CannotCreateClient(e) => {
                write!(f, "Unable to create a reqwest client for the store: {e}.")
            }
            Self::NoResponse(op, e) => {
                write!(f, "Did not get a response from the store during {op}. reqwest Error: {e}.")
            }
            Self::Utf8Decode(op) => {
                write!(f, "Cannot decode the response during {op} as utf-8.")
            }
            Self::Deserialize(op) => {
                write!(f, "Cannot deserialize the response during {op}.")
            }
            Self::Api(op, status, body) => {
                write!(f, "The store rejected {op} with status {status}. Response body: {body}.")
            }
        }
    }
}
impl core::error::Error for StoreError {}

/// A row of the `users` table.
///
/// Reads request a column subset via `select=`, so everything beyond the key
/// and the name is optional here.
#[derive(Debug, Deserialize)]
pub struct UserRow {
    pub employee_id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// A row of the `staff_members` display table.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StaffMemberRow {
    pub name: String,
    pub position: String,
    pub display_order: i64,
}

/// A row of the `leave_requests` table.
#[derive(Debug, Deserialize)]
pub struct LeaveRequestRow {
    pub id: i64,
    pub employee_id: String,
    pub leave_type: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// The `position` column of a `users` row, for the headcount report.
#[derive(Debug, Deserialize)]
pub struct PositionRow {
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayOrderRow {
    display_order: i64,
}

fn table_url(config: &Config, table: &str) -> String {
    format!("{}/rest/v1/{}", config.store.url, table)
}

/// Send a request and parse the JSON array of rows the store returns.
async fn read_rows<T: serde::de::DeserializeOwned>(
    op: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<Vec<T>, StoreError> {
    let response = match request.send().await {
        Ok(x) => x,
        Err(e) => {
            warn!("There was a problem getting a response from the store during {op}.");
            return Err(StoreError::NoResponse(op, e));
        }
    };
    let status = response.status();
    let text = match response.text().await {
        Ok(x) => x,
        Err(e) => {
            warn!("There was an error reading the response from the store as utf-8: {e}");
            return Err(StoreError::Utf8Decode(op));
        }
    };
    if !status.is_success() {
        return Err(StoreError::Api(op, status, text));
    }
    match serde_json::from_str(&text) {
        Ok(x) => Ok(x),
        Err(_) => {
            warn!("There was an error parsing the return value from the store during {op}.");
            warn!("The complete text received was: {text}");
            Err(StoreError::Deserialize(op))
        }
    }
}

/// Send a write whose response body we do not need (`Prefer: return=minimal`).
async fn execute(op: &'static str, request: reqwest::RequestBuilder) -> Result<(), StoreError> {
    let response = match request.send().await {
        Ok(x) => x,
        Err(e) => {
            warn!("There was a problem getting a response from the store during {op}.");
            return Err(StoreError::NoResponse(op, e));
        }
    };
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Api(op, status, body))
}

/// Insert-or-overwrite a user row, keyed on `employee_id`.
pub async fn upsert_user(config: &Config, record: &StaffRecord) -> Result<(), StoreError> {
    let request = config
        .client
        .post(table_url(config, "users"))
        .query(&[("on_conflict", "employee_id")])
        .header("Prefer", "resolution=merge-duplicates,return=minimal")
        .json(record);
    execute("user upsert", request).await
}

/// All display rows whose name matches exactly.
pub async fn staff_members_by_name(
    config: &Config,
    name: &str,
) -> Result<Vec<StaffMemberRow>, StoreError> {
    let filter = format!("eq.{name}");
    let request = config
        .client
        .get(table_url(config, "staff_members"))
        .query(&[("select", "*"), ("name", filter.as_str())]);
    read_rows("staff member lookup", request).await
}

/// The largest display_order currently in the display table, 0 when empty.
pub async fn max_display_order(config: &Config) -> Result<i64, StoreError> {
    let request = config.client.get(table_url(config, "staff_members")).query(&[
        ("select", "display_order"),
        ("order", "display_order.desc"),
        ("limit", "1"),
    ]);
    let rows: Vec<DisplayOrderRow> = read_rows("max display order", request).await?;
    Ok(rows.first().map(|row| row.display_order).unwrap_or(0))
}

pub async fn insert_staff_member(
    config: &Config,
    row: &StaffMemberRow,
) -> Result<(), StoreError> {
    let request = config
        .client
        .post(table_url(config, "staff_members"))
        .header("Prefer", "return=minimal")
        .json(row);
    execute("staff member insert", request).await
}

/// Update only the position of the display row(s) with this name.
/// display_order is deliberately left untouched.
pub async fn update_staff_member_position(
    config: &Config,
    name: &str,
    position: &str,
) -> Result<(), StoreError> {
    let filter = format!("eq.{name}");
    let request = config
        .client
        .patch(table_url(config, "staff_members"))
        .query(&[("name", filter.as_str())])
        .header("Prefer", "return=minimal")
        .json(&serde_json::json!({ "position": position }));
    execute("staff member position update", request).await
}

/// The user rows for a set of employee ids, as written by the sync.
pub async fn users_by_employee_ids(
    config: &Config,
    employee_ids: &[String],
) -> Result<Vec<UserRow>, StoreError> {
    let filter = format!("in.({})", employee_ids.join(","));
    let request = config.client.get(table_url(config, "users")).query(&[
        ("select", "employee_id,name,position,role"),
        ("employee_id", filter.as_str()),
    ]);
    read_rows("synced user listing", request).await
}

/// All user rows whose name matches exactly.
pub async fn users_by_name(config: &Config, name: &str) -> Result<Vec<UserRow>, StoreError> {
    let filter = format!("eq.{name}");
    let request = config
        .client
        .get(table_url(config, "users"))
        .query(&[("select", "*"), ("name", filter.as_str())]);
    read_rows("user lookup", request).await
}

/// Employee id, name and role of every user.
pub async fn user_roles(config: &Config) -> Result<Vec<UserRow>, StoreError> {
    let request = config
        .client
        .get(table_url(config, "users"))
        .query(&[("select", "employee_id,name,role")]);
    read_rows("role listing", request).await
}

/// The position column of every user with the staff role.
pub async fn staff_positions(config: &Config) -> Result<Vec<PositionRow>, StoreError> {
    let request = config
        .client
        .get(table_url(config, "users"))
        .query(&[("select", "position"), ("role", "eq.staff")]);
    read_rows("staff headcount", request).await
}

pub async fn leave_requests(config: &Config) -> Result<Vec<LeaveRequestRow>, StoreError> {
    let request = config
        .client
        .get(table_url(config, "leave_requests"))
        .query(&[("select", "*")]);
    read_rows("leave request listing", request).await
}
