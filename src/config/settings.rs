use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    /// REST base, e.g. `http://localhost:8080`
    pub api_base_url: String,
    /// WebSocket base, e.g. `ws://localhost:8080`
    pub ws_base_url: String,
    /// Bearer credential for both the REST API and the live feed.
    pub api_token: String,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv().ok(); // loads `.env` file automatically

        let api_base_url = env::var("API_BASE_URL").map_err(|_| "API_BASE_URL missing")?;
        let ws_base_url = env::var("WS_BASE_URL")
            .unwrap_or_else(|_| derive_ws_base(&api_base_url));
        let api_token = env::var("API_TOKEN").map_err(|_| "API_TOKEN missing")?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            ws_base_url: ws_base_url.trim_end_matches('/').to_owned(),
            api_token,
        })
    }
}

fn derive_ws_base(api_base: &str) -> String {
    api_base
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ws_base_derived_from_http_base() {
        assert_eq!(derive_ws_base("http://localhost:8080"), "ws://localhost:8080");
        assert_eq!(derive_ws_base("https://bots.example.com"), "wss://bots.example.com");
    }
}
