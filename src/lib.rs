pub mod batch;
pub mod employee;
pub mod engine;
pub mod error;
pub mod payslip;
pub mod reader;
pub mod rules;
pub mod writer;
