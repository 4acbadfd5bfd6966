//! Адрес backend для REST-запросов

/// Базовый адрес API
///
/// Берется из переменной `API_BASE_URL` на этапе сборки; без нее строится из адреса
/// страницы с портом 3000, например "http://localhost:3000".
pub fn api_base() -> String {
    if let Some(url) = option_env!("API_BASE_URL").filter(|u| !u.trim().is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}
