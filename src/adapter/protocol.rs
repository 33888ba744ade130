//! Protocol Messages
//!
//! Wire format for the request/response boundary. Requests are JSON
//! `{ "bet": {...}, "result": {...} }`; responses carry an HTTP-style status
//! and an `ok` body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game::settle::Settlement;
use crate::game::types::{Bet, RoundResult};

/// Request accepted.
pub const STATUS_OK: u16 = 200;

/// Request rejected (validation or malformed body).
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Request larger than the configured limit.
pub const STATUS_PAYLOAD_TOO_LARGE: u16 = 413;

// =============================================================================
// REQUEST
// =============================================================================

/// A decoded bet request.
#[derive(Debug, Clone, PartialEq)]
pub struct BetRequest {
    /// The wager.
    pub bet: Bet,
    /// The revealed round.
    pub result: RoundResult,
}

impl BetRequest {
    /// Decode a request body.
    ///
    /// The bet is read from `body.bet`, or from the whole body when `bet` is
    /// absent. A bet that is not an object decodes with every field missing,
    /// and a missing or non-object `result` as unrevealed, so validation
    /// names each broken rule.
    pub fn from_body(body: &Value) -> Result<Self, serde_json::Error> {
        let bet_value = match body.get("bet") {
            Some(bet) if !bet.is_null() => bet,
            _ => body,
        };
        let bet = if bet_value.is_object() {
            Bet::deserialize(bet_value)?
        } else {
            Bet::missing()
        };

        let result = match body.get("result") {
            Some(result) if result.is_object() => RoundResult::deserialize(result)?,
            _ => RoundResult::unrevealed(),
        };

        Ok(Self { bet, result })
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Response body. Exactly one of `settlement`, `errors`, `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetResponse {
    /// Whether the bet was settled.
    pub ok: bool,
    /// The settlement, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
    /// Receipt digest (hex), on success when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    /// Every violated validation rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Single failure message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BetResponse {
    /// Successful settlement.
    pub fn settled(settlement: Settlement, receipt: Option<String>) -> Self {
        Self {
            ok: true,
            settlement: Some(settlement),
            receipt,
            errors: None,
            error: None,
        }
    }

    /// Validation failure listing every violated rule.
    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            ok: false,
            settlement: None,
            receipt: None,
            errors: Some(errors),
            error: None,
        }
    }

    /// Any other failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            settlement: None,
            receipt: None,
            errors: None,
            error: Some(message.into()),
        }
    }
}

/// Status plus body, one per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body.
    pub body: BetResponse,
}

impl HandlerResponse {
    /// Build a response.
    pub fn new(status: u16, body: BetResponse) -> Self {
        Self { status, body }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::{LineCount, Picks, Side, Submitted};
    use serde_json::json;

    #[test]
    fn test_request_with_bet_and_result() {
        let body = json!({
            "bet": { "type": "COMBO3", "picks": { "start": "LEFT", "lines": 4, "end": "LEFT" }, "stake": 300 },
            "result": { "start": "LEFT", "lines": 4, "end": "LEFT" }
        });
        let request = BetRequest::from_body(&body).unwrap();

        assert_eq!(request.bet, Bet::combo3(Side::Left, LineCount::Four, Side::Left, 300));
        assert_eq!(request.result, RoundResult::new(Side::Left, LineCount::Four, Side::Left));
    }

    #[test]
    fn test_request_body_is_bet() {
        let body = json!({ "type": "SINGLE", "picks": { "end": "RIGHT" }, "stake": 100 });
        let request = BetRequest::from_body(&body).unwrap();

        assert!(request.bet.bet_type.is_valid());
        assert_eq!(request.result, RoundResult::unrevealed());
    }

    #[test]
    fn test_request_non_object_fields_decode_as_missing() {
        let request = BetRequest::from_body(&json!({ "bet": "all in" })).unwrap();
        assert_eq!(request.bet, Bet::missing());
        assert_eq!(request.result, RoundResult::unrevealed());

        let request = BetRequest::from_body(&json!({ "bet": 42, "result": "LEFT" })).unwrap();
        assert_eq!(request.bet, Bet::missing());
        assert_eq!(request.result, RoundResult::unrevealed());

        let request = BetRequest::from_body(&json!({ "bet": {}, "result": [1, 2] })).unwrap();
        assert_eq!(request.result, RoundResult::unrevealed());

        let request = BetRequest::from_body(&json!(42)).unwrap();
        assert_eq!(request.bet, Bet::missing());
    }

    #[test]
    fn test_request_picks_string_is_empty() {
        let body = json!({ "bet": { "type": "SINGLE", "picks": "LEFT", "stake": 50 } });
        let request = BetRequest::from_body(&body).unwrap();

        assert_eq!(request.bet.picks, Picks::default());
        assert_eq!(request.bet.stake, Submitted::Valid(50));
    }

    #[test]
    fn test_response_shapes() {
        let rejected = serde_json::to_value(BetResponse::rejected(vec!["x".into()])).unwrap();
        assert_eq!(rejected, json!({ "ok": false, "errors": ["x"] }));

        let failed = serde_json::to_value(BetResponse::failed("boom")).unwrap();
        assert_eq!(failed, json!({ "ok": false, "error": "boom" }));

        let wrapped = HandlerResponse::new(STATUS_BAD_REQUEST, BetResponse::failed("boom"));
        assert_eq!(
            wrapped.to_json().unwrap(),
            r#"{"status":400,"body":{"ok":false,"error":"boom"}}"#
        );
    }
}
