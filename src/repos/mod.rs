pub mod content_repo;
pub mod error;
#[cfg(test)]
pub mod memory_content_repo;
pub mod pg_content_repo;
