mod check;
pub use check::CompatibilityCheck;
