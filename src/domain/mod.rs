/*
 * Responsibility
 * - Domain types that are independent of HTTP and storage
 */
pub mod content;
