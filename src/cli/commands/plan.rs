//! Plan command implementation
//!
//! Loads a page, selects meters and assigns a staff member, then prints the
//! resulting visit plan as JSON for the mapping service.

use super::common::{exit_code_for, load_or_report, open_store, FilterArgs, PageArgs};
use crate::domain::{find_employee, EmployeeId, MeterId};
use clap::Args;

/// Arguments for the plan command
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub page: PageArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Meter ids to visit (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<MeterId>,

    /// Select every meter left visible by the filters
    #[arg(long)]
    pub all_visible: bool,

    /// Staff member performing the visit
    #[arg(long)]
    pub employee: Option<i64>,

    /// List the staff roster and exit
    #[arg(long)]
    pub list_staff: bool,
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_report(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let mut store = match open_store(&config, &self.page).await {
            Ok(store) => store,
            Err(code) => return Ok(code),
        };

        if self.list_staff {
            for member in &store.environment().staff {
                println!("{:>4}  {}", member.id.get(), member.name);
            }
            return Ok(0);
        }

        self.filters.apply_to(&mut store);
        if self.all_visible {
            store.toggle_all_visible();
        }
        for id in &self.select {
            if let Err(e) = store.select(*id) {
                println!("❌ {}", e.user_message());
                return Ok(exit_code_for(&e));
            }
        }

        let employee = match self.employee {
            Some(raw) => {
                let id = EmployeeId::new(raw);
                match find_employee(&store.environment().staff, id) {
                    Some(member) => Some(member.clone()),
                    None => {
                        println!("❌ Unknown staff member {id}");
                        return Ok(2);
                    }
                }
            }
            None => None,
        };

        match store.build_visit_plan(employee.as_ref()) {
            Ok(plan) => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                Ok(0)
            }
            Err(e) => {
                println!("⚠️  {}", e.user_message());
                Ok(exit_code_for(&e))
            }
        }
    }
}
