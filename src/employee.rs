use crate::error::PayrollError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One employee's compensation record for a single pay period.
///
/// All monetary fields are expected to be non-negative; `validate` enforces
/// this at the engine boundary.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Employee {
    pub staff_id: u32,
    pub gross_salary: Decimal,
    pub benefits: Decimal,
    pub provident_fund: Decimal,
    pub loan_repayment: Decimal,
    pub sacco_contribution: Decimal,
    pub other_deductions: Decimal,
}

impl Employee {
    /// Rejects negative monetary fields, naming the first offending one.
    pub fn validate(&self) -> Result<(), PayrollError> {
        let fields: [(&'static str, Decimal); 6] = [
            ("gross_salary", self.gross_salary),
            ("benefits", self.benefits),
            ("provident_fund", self.provident_fund),
            ("loan_repayment", self.loan_repayment),
            ("sacco_contribution", self.sacco_contribution),
            ("other_deductions", self.other_deductions),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(PayrollError::ValidationError { field, value });
            }
        }
        Ok(())
    }

    /// Base pay plus taxable benefits, before any deduction.
    pub fn gross_taxable_income(&self) -> Decimal {
        self.gross_salary + self.benefits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn employee() -> Employee {
        Employee {
            staff_id: 1,
            gross_salary: dec!(50000),
            benefits: dec!(5000),
            provident_fund: dec!(2000),
            loan_repayment: dec!(1000),
            sacco_contribution: dec!(500),
            other_deductions: dec!(250),
        }
    }

    #[test]
    fn test_employee_deserialization() {
        let csv = "staff_id, gross_salary, benefits, provident_fund, loan_repayment, sacco_contribution, other_deductions\n7, 50000, 5000, 2000, 1000, 500, 250";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();

        let result: Employee = iter.next().unwrap().expect("Failed to deserialize employee");
        assert_eq!(result.staff_id, 7);
        assert_eq!(result.gross_salary, dec!(50000));
        assert_eq!(result.other_deductions, dec!(250));
    }

    #[test]
    fn test_validate_accepts_non_negative() {
        assert!(employee().validate().is_ok());

        let mut zeroed = employee();
        zeroed.gross_salary = Decimal::ZERO;
        zeroed.benefits = Decimal::ZERO;
        assert!(zeroed.validate().is_ok());
    }

    #[test]
    fn test_validate_names_offending_field() {
        let mut bad = employee();
        bad.sacco_contribution = dec!(-1);

        let err = bad.validate().unwrap_err();
        match err {
            PayrollError::ValidationError { field, value } => {
                assert_eq!(field, "sacco_contribution");
                assert_eq!(value, dec!(-1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_gross_taxable_income() {
        assert_eq!(employee().gross_taxable_income(), dec!(55000));
    }
}
