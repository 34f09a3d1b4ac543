//! Domain identifier types
//!
//! Newtype wrappers keep meter and staff identifiers from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meter identifier, unique within one page of results
///
/// # Examples
///
/// ```
/// use fairwatt::domain::ids::MeterId;
/// use std::str::FromStr;
///
/// let id = MeterId::from_str("42").unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeterId(i64);

impl MeterId {
    /// Creates a new MeterId
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MeterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MeterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid meter ID: '{s}'"))
    }
}

impl From<i64> for MeterId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Staff member identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Creates a new EmployeeId
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EmployeeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("Invalid employee ID: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_id_from_str() {
        assert_eq!(MeterId::from_str(" 17 ").unwrap(), MeterId::new(17));
        assert!(MeterId::from_str("abc").is_err());
        assert!(MeterId::from_str("").is_err());
    }

    #[test]
    fn test_meter_id_serde_transparent() {
        let json = serde_json::to_string(&MeterId::new(5)).unwrap();
        assert_eq!(json, "5");
        let id: MeterId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_employee_id_display() {
        assert_eq!(EmployeeId::new(3).to_string(), "3");
        assert!(EmployeeId::from_str("x").is_err());
    }
}
