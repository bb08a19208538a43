use crate::error::PayrollError;
use crate::payslip::Payslip;
use std::io::Write;

pub struct PayslipWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayslipWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes one CSV row per payslip, amounts normalized (no trailing
    /// zeros) so output is stable across rule tables.
    pub fn write_payslips(&mut self, payslips: &[Payslip]) -> Result<(), PayrollError> {
        for payslip in payslips {
            self.writer.serialize(payslip.normalized())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
