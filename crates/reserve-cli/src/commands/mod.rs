pub mod frequencies;
pub mod interest;
pub mod simulate;
