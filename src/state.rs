use crate::config::AppConfig;
use crate::services::ai::ChatModel;
use crate::services::index::DocumentIndex;
use crate::services::relay::ChatRelay;

pub struct AppState {
    pub config: AppConfig,
    pub index: Box<dyn DocumentIndex>,
    pub chat: Box<dyn ChatModel>,
    pub relay: Box<dyn ChatRelay>,
}
