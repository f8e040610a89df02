// Application state for HTTP handlers
use crate::application::sample_service::SampleService;

#[derive(Clone)]
pub struct AppState {
    pub sample_service: SampleService,
}
