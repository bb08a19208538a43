use crate::employee::Employee;
use rust_decimal::Decimal;
use serde::Serialize;

/// The complete computed breakdown for one employee in one pay period.
///
/// Produced fresh by each `calculate` call; never mutated afterwards.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Payslip {
    pub staff_id: u32,
    pub gross_taxable_income: Decimal,
    pub pension_contribution: Decimal,
    pub health_contribution: Decimal,
    pub housing_levy: Decimal,
    pub provident_fund_relief: Decimal,
    pub taxable_income: Decimal,
    pub paye: Decimal,
    pub loan_repayment: Decimal,
    pub sacco_contribution: Decimal,
    pub other_deductions: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
}

impl Payslip {
    /// True if the one-third rule shrank any voluntary deduction below what
    /// the employee elected. Callers surface this as a warning; the engine
    /// itself emits nothing.
    pub fn deductions_adjusted(&self, employee: &Employee) -> bool {
        self.loan_repayment < employee.loan_repayment
            || self.sacco_contribution < employee.sacco_contribution
            || self.other_deductions < employee.other_deductions
    }

    /// The regulatory minimum net pay for this slip's gross taxable income.
    pub fn net_pay_floor(&self) -> Decimal {
        self.gross_taxable_income / Decimal::from(3)
    }

    /// True when even zeroing every voluntary deduction could not lift net
    /// pay to the floor.
    pub fn below_net_pay_floor(&self) -> bool {
        self.net_pay < self.net_pay_floor()
    }

    /// Copy with every amount stripped of trailing zeros, for stable CSV
    /// output.
    pub fn normalized(&self) -> Payslip {
        Payslip {
            staff_id: self.staff_id,
            gross_taxable_income: self.gross_taxable_income.normalize(),
            pension_contribution: self.pension_contribution.normalize(),
            health_contribution: self.health_contribution.normalize(),
            housing_levy: self.housing_levy.normalize(),
            provident_fund_relief: self.provident_fund_relief.normalize(),
            taxable_income: self.taxable_income.normalize(),
            paye: self.paye.normalize(),
            loan_repayment: self.loan_repayment.normalize(),
            sacco_contribution: self.sacco_contribution.normalize(),
            other_deductions: self.other_deductions.normalize(),
            total_deductions: self.total_deductions.normalize(),
            net_pay: self.net_pay.normalize(),
        }
    }
}
