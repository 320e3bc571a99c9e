pub mod counter;
pub mod ledger;
pub mod report;
