pub mod catalog;
pub mod employee;
pub mod import;
pub mod label;
pub mod program;
pub mod reconcile;
pub mod score;
pub mod training;
