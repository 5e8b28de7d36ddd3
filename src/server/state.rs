use std::sync::Arc;

use crate::feed::FeedSource;
use crate::settings::Settings;

// Application state shared by all handlers. Nothing in it is mutated.
#[derive(Clone)]
pub struct AppState {
    pub feeds: Arc<dyn FeedSource>,
    pub settings: Arc<Settings>,
}
