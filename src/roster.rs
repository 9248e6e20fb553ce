//! The staff roster input: a YAML list of staff descriptors.

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// One staff descriptor from the roster file. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    /// Unique key of the user row.
    pub employee_id: String,
    pub password: String,
    /// Key of the display row. Treated as unique by the sync.
    pub name: String,
    pub role: Role,
    pub position: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Admin,
    Employee,
}

#[derive(Debug)]
pub enum RosterError {
    Unreadable(std::io::Error),
    Syntax(serde_yaml::Error),
}
impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Unreadable(e) => {
                write!(f, "Unable to read the roster file: {e}.")
            }
            Self::Syntax(e) => {
                write!(f, "The roster file had syntax errors: {e}.")
            }
        }
    }
}
impl std::error::Error for RosterError {}

pub fn load_roster(path: &Path) -> Result<Vec<StaffRecord>, RosterError> {
    let f = match File::open(path) {
        Ok(x) => x,
        Err(e) => {
            event!(Level::ERROR, "roster file {} not readable: {e}", path.display());
            return Err(RosterError::Unreadable(e));
        }
    };
    match serde_yaml::from_reader(f) {
        Ok(x) => Ok(x),
        Err(e) => {
            event!(Level::ERROR, "roster file had syntax errors: {e}");
            Err(RosterError::Syntax(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_yaml_parses_into_records() {
        let yaml = "\
- employee_id: STAFF-A001
  password: Staff@A2025
  name: Alice
  role: staff
  position: Nurse
- employee_id: ADMIN-001
  password: Admin@2025
  name: Bob
  role: admin
  position: Manager
";
        let records: Vec<StaffRecord> = serde_yaml::from_str(yaml).expect("valid roster");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            StaffRecord {
                employee_id: "STAFF-A001".to_string(),
                password: "Staff@A2025".to_string(),
                name: "Alice".to_string(),
                role: Role::Staff,
                position: "Nurse".to_string(),
            }
        );
        assert_eq!(records[1].role, Role::Admin);
    }

    #[test]
    fn unknown_role_is_a_syntax_error() {
        let yaml = "\
- employee_id: STAFF-A001
  password: pw
  name: Alice
  role: superuser
  position: Nurse
";
        let parsed: Result<Vec<StaffRecord>, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn record_serializes_with_lowercase_role() {
        let record = StaffRecord {
            employee_id: "STAFF-A001".to_string(),
            password: "pw".to_string(),
            name: "Alice".to_string(),
            role: Role::Staff,
            position: "Nurse".to_string(),
        };
        let json = serde_json::to_value(&record).expect("serializable");
        assert_eq!(json["role"], "staff");
        assert_eq!(json["employee_id"], "STAFF-A001");
    }
}
