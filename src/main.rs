use clap::Parser;
use medipay::batch;
use medipay::engine::PayrollEngine;
use medipay::reader::EmployeeReader;
use medipay::rules::TaxRules;
use medipay::writer::PayslipWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input employees CSV file
    input: PathBuf,

    /// Statutory rule table as JSON (optional). Defaults to the built-in
    /// tax year.
    #[arg(long)]
    rules: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let rules = match cli.rules {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            TaxRules::from_reader(file).into_diagnostic()?
        }
        None => TaxRules::default(),
    };
    let engine = PayrollEngine::new(rules).into_diagnostic()?;

    let reader = EmployeeReader::from_path(cli.input).into_diagnostic()?;
    let mut employees = Vec::new();
    for employee_result in reader.employees() {
        match employee_result {
            Ok(employee) => employees.push(employee),
            Err(e) => eprintln!("Error reading employee: {}", e),
        }
    }

    let run = batch::run(engine, employees).await.into_diagnostic()?;

    for failure in &run.failures {
        eprintln!(
            "Error calculating payslip for staff {}: {}",
            failure.staff_id, failure.error
        );
    }
    for staff_id in &run.adjusted {
        eprintln!(
            "Warning: voluntary deductions reduced for staff {} to protect minimum net pay",
            staff_id
        );
    }
    for staff_id in &run.below_floor {
        eprintln!(
            "Warning: staff {} remains below the net-pay floor after zeroing voluntary deductions",
            staff_id
        );
    }

    let stdout = io::stdout();
    let mut writer = PayslipWriter::new(stdout.lock());
    writer.write_payslips(&run.payslips).into_diagnostic()?;

    Ok(())
}
