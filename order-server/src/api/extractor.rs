//! Tenant / actor extractor
//!
//! 身份由外部网关写入请求头：
//!
//! | Header | 必填 | 说明 |
//! |--------|------|------|
//! | X-Tenant-Id | 是 | 租户 ID |
//! | X-Actor-Id | 否 | 操作人 ID (默认 0) |
//! | X-Actor-Name | 否 | 操作人名称 (默认 system) |

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::order::Actor;

use crate::core::ServerState;
use crate::utils::AppError;

pub const TENANT_HEADER: &str = "x-tenant-id";
pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";

const SYSTEM_ACTOR: &str = "system";

/// Caller identity for one request
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: i64,
    pub actor: Actor,
}

impl FromRequestParts<ServerState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let tenant_id = match header(TENANT_HEADER).and_then(|v| v.parse::<i64>().ok()) {
            Some(id) if id > 0 => id,
            _ => {
                tracing::warn!(uri = ?parts.uri, "Request without a valid tenant header");
                return Err(AppError::tenant_not_selected());
            }
        };

        let actor_id = header(ACTOR_ID_HEADER)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        let actor_name = header(ACTOR_NAME_HEADER).unwrap_or(SYSTEM_ACTOR).to_string();

        Ok(Self {
            tenant_id,
            actor: Actor::new(actor_id, actor_name),
        })
    }
}
