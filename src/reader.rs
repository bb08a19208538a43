use crate::employee::Employee;
use crate::error::PayrollError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming CSV source of employee compensation records.
///
/// Expects a header row naming the seven `Employee` columns
/// (`staff_id,gross_salary,benefits,provident_fund,loan_repayment,`
/// `sacco_contribution,other_deductions`); column order follows the
/// header, fields are whitespace-trimmed, and a malformed row surfaces
/// as an `Err` item without stopping the stream.
pub struct EmployeeReader<R: Read> {
    reader: csv::Reader<R>,
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).flexible(true);
    builder
}

impl EmployeeReader<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PayrollError> {
        let reader = builder().from_path(path)?;
        Ok(Self { reader })
    }
}

impl<R: Read> EmployeeReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: builder().from_reader(source),
        }
    }

    pub fn employees(self) -> impl Iterator<Item = Result<Employee, PayrollError>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayrollError::from))
    }
}
