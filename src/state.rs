/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc なので clone は安い)
 */
use std::sync::Arc;

use crate::repos::content_repo::ContentRepo;

#[derive(Clone)]
pub struct AppState {
    pub contents: Arc<dyn ContentRepo>,
}

impl AppState {
    pub fn new(contents: Arc<dyn ContentRepo>) -> Self {
        Self { contents }
    }
}
