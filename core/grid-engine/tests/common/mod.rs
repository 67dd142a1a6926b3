//! FILENAME: tests/common/mod.rs
//! Fixtures for the grid pipeline integration tests.

#![allow(dead_code)]

use engine::{CellValue, Record};
use grid_engine::{ColumnDefinition, FilterKind, GridRow, SelectOption};

/// A typed record, as a host application would define one.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    pub department: &'static str,
    pub salary: f64,
    pub experience: u32,
    pub status: &'static str,
    pub join_date: &'static str,
}

impl Record for Employee {
    fn field(&self, name: &str) -> Option<CellValue> {
        let value = match name {
            "id" => CellValue::from(self.id as f64),
            "name" => CellValue::from(self.name),
            "email" => CellValue::from(self.email),
            "department" => CellValue::from(self.department),
            "salary" => CellValue::from(self.salary),
            "experience" => CellValue::from(self.experience as f64),
            "status" => CellValue::from(self.status),
            "joinDate" => CellValue::from(self.join_date),
            _ => return None,
        };
        Some(value)
    }
}

fn employee(
    id: u32,
    name: &'static str,
    department: &'static str,
    salary: f64,
    experience: u32,
    status: &'static str,
    join_date: &'static str,
) -> Employee {
    Employee {
        id,
        name,
        email: "",
        department,
        salary,
        experience,
        status,
        join_date,
    }
}

/// Sample staff list used across the integration tests.
pub fn sample_employees() -> Vec<Employee> {
    vec![
        employee(1, "John Doe", "Engineering", 85000.0, 5, "Active", "2020-03-15"),
        employee(2, "Jane Smith", "Marketing", 75000.0, 3, "Active", "2021-07-10"),
        employee(3, "Bob Johnson", "Engineering", 95000.0, 8, "Active", "2019-01-20"),
        employee(4, "Alice Brown", "Sales", 70000.0, 2, "Inactive", "2022-05-03"),
        employee(5, "Charlie Wilson", "Engineering", 92000.0, 5, "Active", "2020-11-12"),
        employee(6, "Diana Davis", "Marketing", 68000.0, 4, "Active", "2021-02-28"),
    ]
}

/// Column set mirroring the demo grid, plus a derived seniority band.
pub fn employee_columns() -> Vec<ColumnDefinition<Employee>> {
    vec![
        ColumnDefinition::field("name")
            .with_header("Name")
            .with_width(150)
            .filterable(FilterKind::Text),
        ColumnDefinition::field("department")
            .with_header("Department")
            .with_width(130)
            .with_select_options(vec![
                SelectOption::new("Engineering", "Engineering"),
                SelectOption::new("Marketing", "Marketing"),
                SelectOption::new("Sales", "Sales"),
            ]),
        ColumnDefinition::field("salary")
            .with_header("Salary")
            .with_width(120)
            .filterable(FilterKind::Number)
            .groupable(false)
            .with_formatter(|v| format!("${}", v.display_value())),
        ColumnDefinition::field("experience")
            .with_header("Experience")
            .filterable(FilterKind::Number)
            .with_formatter(|v| format!("{} years", v.display_value())),
        ColumnDefinition::field("status")
            .with_header("Status")
            .with_select_options(vec![
                SelectOption::new("Active", "Active"),
                SelectOption::new("Inactive", "Inactive"),
            ]),
        ColumnDefinition::field("joinDate")
            .with_header("Join Date")
            .filterable(FilterKind::Date),
        ColumnDefinition::derived("seniority", |e: &Employee| {
            CellValue::from(if e.experience >= 5 { "Senior" } else { "Junior" })
        })
        .with_header("Seniority"),
    ]
}

pub fn keys(group_by: &[&str]) -> Vec<String> {
    group_by.iter().map(|s| s.to_string()).collect()
}

/// Names of the data rows, in display order.
pub fn data_names(rows: &[GridRow<'_, Employee>]) -> Vec<&'static str> {
    rows.iter().filter_map(GridRow::record).map(|e| e.name).collect()
}

/// Paths of the group rows, in display order.
pub fn group_paths_of(rows: &[GridRow<'_, Employee>]) -> Vec<String> {
    rows.iter()
        .filter_map(GridRow::as_group)
        .map(|g| g.path.clone())
        .collect()
}
