//! Field staff assigned to visit plans

use super::ids::EmployeeId;
use serde::{Deserialize, Serialize};

/// Staff member (or crew) who performs field visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Full name
    pub name: String,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(id),
            name: name.into(),
        }
    }
}

/// Looks up a staff member by identifier
pub fn find_employee(roster: &[Employee], id: EmployeeId) -> Option<&Employee> {
    roster.iter().find(|e| e.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_employee() {
        let roster = vec![Employee::new(1, "A"), Employee::new(2, "B")];
        assert_eq!(find_employee(&roster, EmployeeId::new(2)).unwrap().name, "B");
        assert!(find_employee(&roster, EmployeeId::new(9)).is_none());
    }
}
