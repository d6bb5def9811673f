pub mod callback;
pub mod downloads;
