use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::authz::{AccessDecision, GuardRequest};

#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent<T> {
    pub id: Uuid,
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub actor_id: Option<Uuid>,
    pub payload: T,
}

impl<T> DomainEvent<T> {
    pub fn new(name: &'static str, actor_id: Option<Uuid>, payload: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            occurred_at: Utc::now(),
            actor_id,
            payload,
        }
    }
}

pub type EventBus = broadcast::Sender<Value>;

pub fn init_event_bus() -> (EventBus, broadcast::Receiver<Value>) {
    broadcast::channel(1024)
}

/// Severity levels for admin log entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Denied access: kept for audit review
    Important,
    /// Granted access: aggressively trimmed
    #[default]
    Noise,
}

/// Request context for the admin log (IP, User-Agent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Extract context from Axum request headers
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string())
            .or_else(|| {
                headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            });

        let user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Self { ip, user_agent }
    }
}

/// Payload recorded for each guard decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionPayload {
    pub entity_type: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<RequestContext>,
    pub severity: Severity,
}

/// Publish a guard decision for the admin log.
///
/// Fire and forget: a missing listener never affects the decision.
pub fn log_decision(
    event_bus: &EventBus,
    actor_id: Uuid,
    request: &GuardRequest<'_>,
    decision: &AccessDecision,
    context: Option<RequestContext>,
) {
    let name = if decision.allowed { "access.granted" } else { "access.denied" };
    let severity = if decision.allowed { Severity::Noise } else { Severity::Important };

    let payload = DecisionPayload {
        entity_type: request.entity_type.to_string(),
        action: request.action.to_string(),
        resource_id: request.resource_id.map(String::from),
        allowed: decision.allowed,
        reason: decision.reason.map(|reason| reason.as_str().to_string()),
        context,
        severity,
    };

    let event = DomainEvent::new(name, Some(actor_id), payload);
    let _ = event_bus.send(serde_json::to_value(event).unwrap_or_default());
}

/// Drain decision events into the admin log. Denials are logged with their reason.
pub async fn start_decision_listener(mut rx: broadcast::Receiver<Value>) {
    tracing::info!("decision listener started");
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "decision listener lagged, events dropped");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let name = event.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
        let actor_id = event.get("actor_id").and_then(|v| v.as_str()).unwrap_or("-");
        let payload = event.get("payload").cloned().unwrap_or_default();
        let field = |key: &str| payload.get(key).and_then(|v| v.as_str()).unwrap_or("-").to_string();

        match name {
            "access.denied" => tracing::warn!(
                target: "admin_log",
                actor_id,
                entity_type = %field("entity_type"),
                action = %field("action"),
                resource_id = %field("resource_id"),
                reason = %field("reason"),
                "access denied"
            ),
            _ => tracing::debug!(
                target: "admin_log",
                actor_id,
                entity_type = %field("entity_type"),
                action = %field("action"),
                resource_id = %field("resource_id"),
                "access granted"
            ),
        }
    }
    tracing::info!("decision listener stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::DenialReason;
    use crate::models::{Action, EntityType};

    #[tokio::test]
    async fn denial_event_carries_reason_code() {
        let (bus, mut rx) = init_event_bus();
        let actor = Uuid::new_v4();
        let request = GuardRequest::new(EntityType::Sites, Action::Delete).on("site-1");

        log_decision(&bus, actor, &request, &AccessDecision::deny(DenialReason::NotOwnerOrAdmin), None);

        let event = rx.recv().await.unwrap();
        assert_eq!(event["name"], "access.denied");
        assert_eq!(event["actor_id"], actor.to_string());
        assert_eq!(event["payload"]["reason"], "not_owner_or_admin");
        assert_eq!(event["payload"]["resource_id"], "site-1");
        assert_eq!(event["payload"]["severity"], "important");
    }

    #[tokio::test]
    async fn listener_stops_when_bus_closes() {
        let (bus, rx) = init_event_bus();
        let handle = tokio::spawn(start_decision_listener(rx));

        let request = GuardRequest::new(EntityType::Documents, Action::Read);
        log_decision(&bus, Uuid::new_v4(), &request, &AccessDecision::allow(), None);
        drop(bus);

        handle.await.unwrap();
    }

    #[test]
    fn context_prefers_first_forwarded_address() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.1, 10.0.0.2".parse().unwrap());
        headers.insert(axum::http::header::USER_AGENT, "curl/8".parse().unwrap());

        let ctx = RequestContext::from_headers(&headers);
        assert_eq!(ctx.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(ctx.user_agent.as_deref(), Some("curl/8"));
    }
}
