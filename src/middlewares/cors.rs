use actix_cors::Cors;

use crate::config::CorsConfig;

fn allows_any(values: &[String]) -> bool {
    values.is_empty() || values.iter().any(|v| v == "*")
}

/// 按配置构造 CORS 中间件，列表为空或包含 `*` 时不做限制
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().max_age(config.max_age);

    cors = if allows_any(&config.allowed_origins) {
        cors.allow_any_origin()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    };

    cors = if allows_any(&config.allowed_methods) {
        cors.allow_any_method()
    } else {
        cors.allowed_methods(config.allowed_methods.iter().map(String::as_str))
    };

    if allows_any(&config.allowed_headers) {
        cors.allow_any_header()
    } else {
        cors.allowed_headers(config.allowed_headers.iter().map(String::as_str))
    }
}
