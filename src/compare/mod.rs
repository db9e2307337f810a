pub mod differ;
pub mod report;
