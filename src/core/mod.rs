pub mod checks;
pub mod error;
pub mod report;
pub mod rules;
pub mod scan;
pub mod validate;
