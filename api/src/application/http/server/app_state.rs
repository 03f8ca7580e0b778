use std::sync::Arc;

use bootcamp_core::application::BootcampService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: BootcampService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: BootcampService) -> Self {
        Self { args, service }
    }
}
