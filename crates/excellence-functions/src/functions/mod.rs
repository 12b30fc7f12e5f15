pub mod finance;
pub mod text;
