use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::constants::*;
use crate::error::{ApiError, TicketError};
use crate::goals::Goal;
use crate::shared_roulette::{RewardText, Segment};

/// Server-confirmed ticket balance after a ticket was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketReceipt {
    pub tickets: i32,
}

#[derive(Debug, Deserialize)]
struct TicketBalanceResponse {
    tickets: i32,
}

/// REST endpoints the reward wheel depends on.
#[allow(async_fn_in_trait)]
pub trait RouletteApi {
    async fn fetch_reward_text(&self, segment: Segment) -> Result<RewardText, ApiError>;

    /// Uses one ticket on the server.
    async fn consume_ticket(&self) -> Result<TicketReceipt, TicketError>;

    async fn fetch_ticket_balance(&self) -> Result<i32, ApiError>;

    async fn fetch_goals(&self) -> Result<Vec<Goal>, ApiError>;
}

/// Looks up the prize text for `segment`. Never fails: any error is logged and
/// replaced by the fallback text.
pub async fn resolve_reward_text<A: RouletteApi>(api: &A, segment: Segment) -> RewardText {
    match api.fetch_reward_text(segment).await {
        Ok(reward) => reward,
        Err(e) => {
            log::error!("Error fetching reward text for segment {}: {}", segment, e);
            RewardText::fallback()
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.config.url(path));
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response.json::<T>().await?)
    }
}

fn error_message(body: &Value) -> Option<String> {
    body.get("error").and_then(Value::as_str).map(str::to_string)
}

impl RouletteApi for HttpApi {
    async fn fetch_reward_text(&self, segment: Segment) -> Result<RewardText, ApiError> {
        self.get_json(&format!("{}/{}", REWARD_TEXT_ENDPOINT, segment))
            .await
    }

    async fn consume_ticket(&self) -> Result<TicketReceipt, TicketError> {
        let response = self
            .request(Method::PATCH, USE_TICKET_ENDPOINT)
            .send()
            .await
            .map_err(|e| TicketError::Network(e.to_string()))?;

        let status = response.status();
        // Error bodies are optional, a missing one still means rejection
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        if !status.is_success() {
            log::warn!("Ticket use rejected with status {}", status);
            return Err(TicketError::Rejected(error_message(&body)));
        }
        if let Some(msg) = error_message(&body) {
            return Err(TicketError::Rejected(Some(msg)));
        }
        serde_json::from_value::<TicketReceipt>(body).map_err(|e| {
            log::error!("Malformed ticket response: {}", e);
            TicketError::Rejected(None)
        })
    }

    async fn fetch_ticket_balance(&self) -> Result<i32, ApiError> {
        let balance: TicketBalanceResponse = self.get_json(TICKETS_ENDPOINT).await?;
        Ok(balance.tickets)
    }

    async fn fetch_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json(GOALS_ENDPOINT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, patch};
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    const TOKEN: &str = "test-token";

    #[derive(Clone)]
    struct StubState {
        tickets: Arc<AtomicI32>,
    }

    async fn reward_text(Path(number): Path<u8>) -> Result<Json<Value>, StatusCode> {
        if number == 5 {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        Ok(Json(json!({ "id": number, "text": format!("Prize {}", number) })))
    }

    async fn use_ticket(
        State(state): State<StubState>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map_or(false, |v| v == format!("Bearer {}", TOKEN));
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({})));
        }

        let current = state.tickets.load(Ordering::SeqCst);
        if current <= 0 {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "No tickets left" })),
            );
        }
        state.tickets.store(current - 1, Ordering::SeqCst);
        (StatusCode::OK, Json(json!({ "tickets": current - 1 })))
    }

    async fn tickets(State(state): State<StubState>) -> Json<Value> {
        Json(json!({ "tickets": state.tickets.load(Ordering::SeqCst) }))
    }

    async fn goals() -> Json<Value> {
        Json(json!([
            { "id": 1, "title": "Run a marathon", "content": "", "deadline": "2024-10-01",
              "small_goals": [{ "id": 10, "title": "5k", "deadline": "2024-06-01",
                                "difficulty": "easy", "tasks": [{ "id": 100, "content": "Buy shoes", "completed": true }] }] }
        ]))
    }

    async fn spawn_stub(balance: i32) -> (HttpApi, Arc<AtomicI32>) {
        let counter = Arc::new(AtomicI32::new(balance));
        let app = Router::new()
            .route("/roulette_texts/:number", get(reward_text))
            .route("/tickets", get(tickets))
            .route("/tickets/use", patch(use_ticket))
            .route("/goals", get(goals))
            .with_state(StubState {
                tickets: counter.clone(),
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ApiConfig::new(format!("http://{}", addr)).with_token(Some(TOKEN.to_string()));
        (HttpApi::new(config), counter)
    }

    fn segment(n: u8) -> Segment {
        Segment::new(n).unwrap()
    }

    #[tokio::test]
    async fn reward_text_is_passed_through() {
        let (api, _) = spawn_stub(0).await;
        let reward = resolve_reward_text(&api, segment(9)).await;
        assert_eq!(reward.text, "Prize 9");
        assert_eq!(reward.extra.get("id"), Some(&json!(9)));
    }

    #[tokio::test]
    async fn reward_text_falls_back_on_error_status() {
        let (api, _) = spawn_stub(0).await;
        assert_eq!(
            api.fetch_reward_text(segment(5)).await,
            Err(ApiError::Status(500))
        );
        let reward = resolve_reward_text(&api, segment(5)).await;
        assert_eq!(reward, RewardText::fallback());
    }

    #[tokio::test]
    async fn reward_text_falls_back_when_unreachable() {
        let api = HttpApi::new(ApiConfig::new("http://127.0.0.1:1"));
        let reward = resolve_reward_text(&api, segment(3)).await;
        assert_eq!(reward.text, REWARD_FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn consuming_tickets_until_empty() {
        let (api, counter) = spawn_stub(2).await;

        assert_eq!(api.consume_ticket().await, Ok(TicketReceipt { tickets: 1 }));
        assert_eq!(api.fetch_ticket_balance().await, Ok(1));
        assert_eq!(api.consume_ticket().await, Ok(TicketReceipt { tickets: 0 }));

        let err = api.consume_ticket().await.unwrap_err();
        assert_eq!(err.user_message(), "No tickets left");
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_with_generic_message() {
        let (api, counter) = spawn_stub(3).await;
        let anonymous = HttpApi::new(ApiConfig::new(api.config().base_url.clone()));

        let err = anonymous.consume_ticket().await.unwrap_err();
        assert_eq!(err, TicketError::Rejected(None));
        assert_eq!(err.user_message(), TICKET_CONSUME_ERROR);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn unreachable_ticket_endpoint_is_network_error() {
        let api = HttpApi::new(ApiConfig::new("http://127.0.0.1:1"));
        assert!(matches!(
            api.consume_ticket().await,
            Err(TicketError::Network(_))
        ));
    }

    #[tokio::test]
    async fn goals_are_decoded() {
        let (api, _) = spawn_stub(0).await;
        let goals = api.fetch_goals().await.unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].small_goals[0].tasks[0].content, "Buy shoes");
        assert_eq!(goals[0].progress_percent(), 100);
    }
}
