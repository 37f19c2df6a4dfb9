use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub document_path: String,
    pub chat_provider: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub index_url: String,
    pub index_api_key: String,
    pub relay_url: String,
    pub relay_api_key: String,
    pub search_top_k: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            document_path: env::var("DOCUMENT_PATH").unwrap_or_else(|_| "document.pdf".to_string()),
            chat_provider: env::var("CHAT_PROVIDER").unwrap_or_else(|_| "echo".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            index_url: env::var("INDEX_URL").unwrap_or_else(|_| "http://localhost:8100".to_string()),
            index_api_key: env::var("INDEX_API_KEY").unwrap_or_default(),
            relay_url: env::var("RELAY_URL")
                .unwrap_or_else(|_| "http://localhost:8200/chat".to_string()),
            relay_api_key: env::var("RELAY_API_KEY").unwrap_or_default(),
            search_top_k: env::var("SEARCH_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }
}
