pub mod contents;
pub mod health;
