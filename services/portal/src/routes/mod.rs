pub mod admin;
pub mod intake;
pub mod pricing;
