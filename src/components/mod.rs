pub mod backdrop;
pub mod help;
