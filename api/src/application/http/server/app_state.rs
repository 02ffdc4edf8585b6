use std::sync::Arc;

use nutriguard_core::application::NutriguardService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutriguardService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutriguardService) -> Self {
        Self { args, service }
    }
}
