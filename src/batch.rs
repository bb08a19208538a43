//! Batch payroll runs.
//!
//! A run computes one payslip per employee, each on its own tokio task, and
//! aggregates run-level totals. Employees are independent: one failed
//! calculation is recorded against its staff id and never aborts the run.

use crate::employee::Employee;
use crate::engine::PayrollEngine;
use crate::error::{PayrollError, Result};
use crate::payslip::Payslip;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Sums across the successful payslips of one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunTotals {
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

#[derive(Debug)]
pub struct RunFailure {
    pub staff_id: u32,
    pub error: PayrollError,
}

/// Outcome of a batch run, payslips in input order.
#[derive(Debug)]
pub struct PayrollRun {
    pub payslips: Vec<Payslip>,
    pub failures: Vec<RunFailure>,
    /// Staff whose voluntary deductions were shrunk by the one-third rule.
    pub adjusted: Vec<u32>,
    /// Staff left below the net-pay floor even with all voluntary
    /// deductions zeroed.
    pub below_floor: Vec<u32>,
    pub totals: RunTotals,
}

struct TaskOutcome {
    index: usize,
    staff_id: u32,
    result: std::result::Result<(Payslip, bool), PayrollError>,
}

/// Runs payroll for every employee against one engine.
pub async fn run(engine: PayrollEngine, employees: Vec<Employee>) -> Result<PayrollRun> {
    let engine = Arc::new(engine);
    let mut tasks = JoinSet::new();

    for (index, employee) in employees.into_iter().enumerate() {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            let staff_id = employee.staff_id;
            let result = engine
                .calculate(&employee)
                .map(|slip| {
                    let adjusted = slip.deductions_adjusted(&employee);
                    (slip, adjusted)
                });
            TaskOutcome { index, staff_id, result }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.map_err(|e| PayrollError::BatchError(e.to_string()))?);
    }
    outcomes.sort_by_key(|o| o.index);

    let mut run = PayrollRun {
        payslips: Vec::with_capacity(outcomes.len()),
        failures: Vec::new(),
        adjusted: Vec::new(),
        below_floor: Vec::new(),
        totals: RunTotals::default(),
    };
    for outcome in outcomes {
        match outcome.result {
            Ok((slip, adjusted)) => {
                run.totals.gross += slip.gross_taxable_income;
                run.totals.deductions += slip.total_deductions;
                run.totals.net += slip.net_pay;
                if adjusted {
                    run.adjusted.push(outcome.staff_id);
                }
                if slip.below_net_pay_floor() {
                    run.below_floor.push(outcome.staff_id);
                }
                run.payslips.push(slip);
            }
            Err(error) => run.failures.push(RunFailure {
                staff_id: outcome.staff_id,
                error,
            }),
        }
    }
    Ok(run)
}
