/*!
 * 速率限制中间件
 *
 * 按客户端 IP 计数，窗口内超过上限返回 429。
 *
 * ```rust,ignore
 * web::scope("/api/upload")
 *     .wrap(RateLimit::program_upload())
 *     .route("/program", web::post().to(upload_program))
 * ```
 *
 * 每个 `RateLimit` 实例持有自己的计数缓存，缓存条目的存活时间即时间窗口。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
    // 键: 前缀:IP，值: 窗口内已处理的请求数
    counters: Cache<String, u32>,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
            counters: Cache::builder()
                .time_to_live(Duration::from_secs(window_secs.max(1)))
                .max_capacity(100_000)
                .build(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 程序上传：20次/分钟/IP
    pub fn program_upload() -> Self {
        Self::new(20, 60).with_prefix("upload")
    }

    /// 代码反馈会调用外部模型，限制更严：10次/分钟/IP
    pub fn code_feedback() -> Self {
        Self::new(10, 60).with_prefix("feedback")
    }

    fn key_for(&self, req: &ServiceRequest) -> String {
        let ip = client_ip(req);
        if self.key_prefix.is_empty() {
            format!("ip:{ip}")
        } else {
            format!("{}:ip:{}", self.key_prefix, ip)
        }
    }
}

/// 从连接信息取客户端 IP，部署在反向代理后时依赖代理设置的转发头
fn client_ip(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let candidate = info.realip_remote_addr().unwrap_or("unknown");

    // realip_remote_addr 可能带端口
    if candidate.parse::<IpAddr>().is_ok() {
        return candidate.to_string();
    }
    match candidate.parse::<std::net::SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => candidate.to_string(),
    }
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = limit.key_for(&req);
            let count = limit.counters.get(&key).await.unwrap_or(0);

            if count >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, count, limit.max_requests
                );
                return Ok(req.into_response(
                    too_many_requests(limit.window_secs).map_into_right_body(),
                ));
            }
            limit.counters.insert(key, count + 1).await;

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}
