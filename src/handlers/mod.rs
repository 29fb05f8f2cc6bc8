pub mod product;
pub mod report;
