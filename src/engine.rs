use crate::employee::Employee;
use crate::error::PayrollError;
use crate::payslip::Payslip;
use crate::rules::TaxRules;
use rust_decimal::{Decimal, RoundingStrategy};

/// The voluntary deductions the one-third rule may shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoluntaryDeduction {
    Other,
    Sacco,
    Loan,
}

/// Reduction priority when net pay falls below the floor: `other_deductions`
/// is consumed first, `loan_repayment` last.
pub const REDUCTION_ORDER: [VoluntaryDeduction; 3] = [
    VoluntaryDeduction::Other,
    VoluntaryDeduction::Sacco,
    VoluntaryDeduction::Loan,
];

struct VoluntaryDeductions {
    loan: Decimal,
    sacco: Decimal,
    other: Decimal,
}

impl VoluntaryDeductions {
    fn get_mut(&mut self, kind: VoluntaryDeduction) -> &mut Decimal {
        match kind {
            VoluntaryDeduction::Loan => &mut self.loan,
            VoluntaryDeduction::Sacco => &mut self.sacco,
            VoluntaryDeduction::Other => &mut self.other,
        }
    }

    fn total(&self) -> Decimal {
        self.loan + self.sacco + self.other
    }
}

/// Pure payroll calculator for one statutory rule table.
///
/// `calculate` is deterministic and side-effect free; the engine holds no
/// mutable state, so one instance can serve concurrent batch tasks.
pub struct PayrollEngine {
    rules: TaxRules,
}

impl Default for PayrollEngine {
    fn default() -> Self {
        Self { rules: TaxRules::default() }
    }
}

impl PayrollEngine {
    /// Creates an engine after validating the rule table.
    pub fn new(rules: TaxRules) -> Result<Self, PayrollError> {
        rules.validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Computes the payslip for one employee.
    ///
    /// Statutory contributions and PAYE are derived once from gross taxable
    /// income and never revisited; only the three voluntary deductions move
    /// when the one-third rule kicks in.
    pub fn calculate(&self, employee: &Employee) -> Result<Payslip, PayrollError> {
        employee.validate()?;

        let gross_taxable = employee.gross_taxable_income();
        let pension = (self.rules.pension_rate * gross_taxable).min(self.rules.pension_cap);
        let health = self.rules.health_rate * gross_taxable;
        let housing = self.rules.housing_rate * gross_taxable;
        let provident_relief = employee
            .provident_fund
            .min(self.rules.provident_relief_cap);

        let taxable_income = (gross_taxable - pension - health - housing - provident_relief)
            .max(Decimal::ZERO);
        let paye = self.paye(taxable_income);

        let fixed_deductions = pension + health + housing + paye;
        let mut voluntary = VoluntaryDeductions {
            loan: employee.loan_repayment,
            sacco: employee.sacco_contribution,
            other: employee.other_deductions,
        };

        let floor = gross_taxable / Decimal::from(3);
        let net_pay = gross_taxable - fixed_deductions - voluntary.total();
        if net_pay < floor {
            // The floor is non-terminating whenever gross is not divisible
            // by 3, and 28 digits of shortfall round in the wrong direction.
            // Quantize to cents, rounding up, so the absorbed amount is
            // never less than the true shortfall.
            let mut shortfall = (floor - net_pay)
                .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero);
            for kind in REDUCTION_ORDER {
                let slot = voluntary.get_mut(kind);
                let cut = (*slot).min(shortfall);
                *slot -= cut;
                shortfall -= cut;
                if shortfall <= Decimal::ZERO {
                    break;
                }
            }
            // A shortfall that outlasts all three voluntary deductions stays
            // unresolved: statutory amounts and PAYE are non-negotiable, so
            // net pay lands below the floor.
        }

        let total_deductions = fixed_deductions + voluntary.total();
        Ok(Payslip {
            staff_id: employee.staff_id,
            gross_taxable_income: gross_taxable,
            pension_contribution: pension,
            health_contribution: health,
            housing_levy: housing,
            provident_fund_relief: provident_relief,
            taxable_income,
            paye,
            loan_repayment: voluntary.loan,
            sacco_contribution: voluntary.sacco,
            other_deductions: voluntary.other,
            total_deductions,
            net_pay: gross_taxable - total_deductions,
        })
    }

    /// Progressive band tax on `taxable_income`, less personal relief,
    /// floored at zero.
    fn paye(&self, taxable_income: Decimal) -> Decimal {
        let mut remaining = taxable_income;
        let mut tax = Decimal::ZERO;
        for band in &self.rules.bands {
            if remaining <= Decimal::ZERO {
                break;
            }
            let slice = match band.width {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            tax += slice * band.rate;
            remaining -= slice;
        }
        (tax - self.rules.personal_relief).max(Decimal::ZERO)
    }
}
