const DEFAULT_LANDING_ROUTE: &str = "/";
const DEFAULT_LOGIN_ROUTE: &str = "/login/";
const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Client configuration, read from `window.ENV` when the page provides it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every AJAX route. Empty means same origin.
    pub api_url: String,
    /// Where a successful login lands
    pub landing_route: String,
    /// Where logout and registration send the user
    pub login_route: String,
    pub csrf_cookie_name: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            landing_route: DEFAULT_LANDING_ROUTE.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            csrf_cookie_name: DEFAULT_CSRF_COOKIE.to_string(),
            log_level: log::Level::Debug,
        }
    }
}

impl ClientConfig {
    /// Load configuration from window.ENV, keeping defaults for missing keys
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(api_url) = env_string("API_URL") {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(route) = env_string("LANDING_ROUTE") {
            config.landing_route = route;
        }
        if let Some(route) = env_string("LOGIN_ROUTE") {
            config.login_route = route;
        }
        if let Some(name) = env_string("CSRF_COOKIE_NAME") {
            config.csrf_cookie_name = name;
        }
        if let Some(level) = env_string("LOG_LEVEL").and_then(|s| parse_level(&s)) {
            config.log_level = level;
        }

        config
    }
}

fn parse_level(s: &str) -> Option<log::Level> {
    s.trim().parse().ok()
}

/// Read a string key from window.ENV
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
fn env_string(key: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsValue;

        if let Some(window) = web_sys::window() {
            if let Ok(env) = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")) {
                if !env.is_undefined() {
                    return js_sys::Reflect::get(&env, &JsValue::from_str(key))
                        .ok()
                        .and_then(|v| v.as_string())
                        .filter(|v| !v.is_empty());
                }
            }
        }
    }

    None
}
