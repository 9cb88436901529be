use web_sys::window;

/// API origin for reward requests. Same origin when served by the backend,
/// 127.0.0.1:3000 otherwise.
pub fn get_api_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(location) = window.location().host() {
            if !location.is_empty() {
                // Keep the port number (if any) from the current location
                let protocol = window.location().protocol().unwrap_or_else(|_| "http:".to_string());
                return format!("{}//{}", protocol, location);
            }
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:3000".to_string()
}
