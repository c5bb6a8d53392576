use goalwheel_shared::config::{ApiConfig, RouletteConfig};
use web_sys::window;

pub fn get_api_base_url() -> String {
    // Build-time override for deployments where the API lives elsewhere
    if let Some(url) = option_env!("GOALWHEEL_API_URL") {
        return url.trim_end_matches('/').to_string();
    }

    if let Some(window) = window() {
        if let Ok(host) = window.location().host() {
            if !host.is_empty() && !host.starts_with("localhost") && !host.starts_with("127.0.0.1") {
                let protocol = window.location().protocol().unwrap_or_else(|_| "https:".to_string());
                return format!("{}//{}/api", protocol, host);
            }
        }
    }

    // Local API server
    "http://127.0.0.1:3000".to_string()
}

// Token is written by the sign-in flow
pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item("token").ok().flatten()))
}

pub fn api_config() -> ApiConfig {
    ApiConfig::new(get_api_base_url()).with_token(get_auth_token())
}

pub fn roulette_config() -> RouletteConfig {
    match option_env!("GOALWHEEL_ROULETTE_CONFIG") {
        Some(raw) => RouletteConfig::from_json(raw).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid roulette config: {}", e);
            RouletteConfig::default()
        }),
        None => RouletteConfig::default(),
    }
}
