use crate::cli::commands::open_store;
use crate::cli::parser::{Commands, EmployeeCommand};
use crate::config::Config;
use crate::errors::{AppError, AppResult, Field, ValidationError};
use crate::models::employee::Employee;
use crate::store::{EmployeeDirectory, OpContext};
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };

    let store = open_store(cfg)?;
    let ctx = OpContext::new(Default::default(), cfg.store_timeout());

    match action {
        EmployeeCommand::Add { id, name, role } => {
            if id.trim().is_empty() {
                return Err(ValidationError::new(Field::EmployeeId, "empty").into());
            }
            let employee = Employee::new(id.as_str(), name.trim(), role.trim());
            store.register_employee(&employee, &ctx)?;
            success(format!("Employee {} registered: {}", employee.employee_id, employee.name));
        }
        EmployeeCommand::List { json } => {
            let employees = store.list_employees(&ctx)?;

            if *json {
                let out = serde_json::to_string_pretty(&employees)
                    .map_err(|e| AppError::Export(e.to_string()))?;
                println!("{out}");
                return Ok(());
            }

            if employees.is_empty() {
                warning("No employees registered.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "NAME", "ROLE"]);
            for e in employees {
                table.add_row(vec![e.employee_id, e.name, e.role]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
