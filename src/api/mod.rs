/*
 * Responsibility
 * - 公開ポイント (routes() の re-export)
 */
pub mod dto;
pub mod handlers;
mod routes;

pub use routes::routes;
