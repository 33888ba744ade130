//! Bet Request Handler
//!
//! Thin boundary around the settlement engine:
//!
//! 1. Decode `{ bet, result }` (400 on malformed JSON).
//! 2. Run both validators independently; any violation -> 400 with the
//!    merged error list, bet errors first.
//! 3. Settle -> 200 with the settlement, or 400 with the error message.
//!
//! The handler never touches balances or storage.

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::adapter::config::AdapterConfig;
use crate::adapter::protocol::{
    BetRequest, BetResponse, HandlerResponse, STATUS_BAD_REQUEST, STATUS_OK,
    STATUS_PAYLOAD_TOO_LARGE,
};
use crate::game::settle::{settle_bet, settle_with_receipt};
use crate::game::types::Leg;
use crate::game::validate::{violations, BET_RULES, RESULT_RULES};

/// Handle one raw request line or body.
///
/// Enforces the size limit before parsing.
pub fn handle_raw_request(raw: &str, config: &AdapterConfig) -> HandlerResponse {
    if raw.len() > config.max_request_bytes {
        warn!(
            bytes = raw.len(),
            limit = config.max_request_bytes,
            "Request too large"
        );
        return HandlerResponse::new(
            STATUS_PAYLOAD_TOO_LARGE,
            BetResponse::failed(format!(
                "request exceeds {} bytes",
                config.max_request_bytes
            )),
        );
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(body) => handle_bet_request(&body, config),
        Err(e) => {
            debug!(error = %e, "Malformed request JSON");
            HandlerResponse::new(
                STATUS_BAD_REQUEST,
                BetResponse::failed(format!("malformed JSON: {}", e)),
            )
        }
    }
}

/// Handle a decoded JSON request body.
#[instrument(skip_all)]
pub fn handle_bet_request(body: &Value, config: &AdapterConfig) -> HandlerResponse {
    let request = match BetRequest::from_body(body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Malformed bet request");
            return HandlerResponse::new(
                STATUS_BAD_REQUEST,
                BetResponse::failed(format!("malformed request: {}", e)),
            );
        }
    };

    let mut found = violations(BET_RULES, &request.bet);
    found.extend(violations(RESULT_RULES, &request.result));

    if !found.is_empty() {
        let rules: Vec<&str> = found.iter().map(|v| v.rule).collect();
        info!(?rules, "Bet rejected");
        let errors = found.into_iter().map(|v| v.message).collect();
        return HandlerResponse::new(STATUS_BAD_REQUEST, BetResponse::rejected(errors));
    }

    let settled = if config.include_receipt {
        settle_with_receipt(&request.bet, &request.result)
            .map(|receipt| (receipt.settlement, Some(receipt.digest_hex())))
    } else {
        settle_bet(&request.bet, &request.result).map(|settlement| (settlement, None))
    };

    match settled {
        Ok((settlement, receipt)) => {
            info!(
                win = settlement.win,
                multiplier = %settlement.multiplier,
                payout = %settlement.payout,
                "Bet settled"
            );
            for leg in Leg::ALL {
                debug!(leg = leg.name(), outcome = ?settlement.leg(leg), "Leg");
            }
            HandlerResponse::new(STATUS_OK, BetResponse::settled(settlement, receipt))
        }
        Err(e) => {
            warn!(error = %e, "Settlement failed after validation");
            HandlerResponse::new(STATUS_BAD_REQUEST, BetResponse::failed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handle(body: Value) -> HandlerResponse {
        handle_bet_request(&body, &AdapterConfig::default())
    }

    #[test]
    fn test_settles_valid_request() {
        let response = handle(json!({
            "bet": { "type": "SINGLE", "picks": { "start": "LEFT", "end": "RIGHT" }, "stake": 1000 },
            "result": { "start": "LEFT", "lines": 3, "end": "RIGHT" }
        }));

        assert_eq!(response.status, STATUS_OK);
        assert!(response.body.ok);

        let body = serde_json::to_value(&response.body).unwrap();
        assert_eq!(body["settlement"]["win"], json!(true));
        assert_eq!(body["settlement"]["multiplier"], json!(3.24));
        assert_eq!(body["settlement"]["payout"], json!(3240));
        assert!(body.get("receipt").is_none());
    }

    #[test]
    fn test_losing_bet_is_still_200() {
        let response = handle(json!({
            "bet": { "type": "COMBO3", "picks": { "start": "LEFT", "lines": 4, "end": "RIGHT" }, "stake": 1000 },
            "result": { "start": "LEFT", "lines": 3, "end": "RIGHT" }
        }));

        assert_eq!(response.status, STATUS_OK);
        let settlement = response.body.settlement.unwrap();
        assert!(!settlement.win);
        assert!(settlement.payout.is_zero());
    }

    #[test]
    fn test_merges_bet_and_result_errors() {
        let response = handle(json!({
            "bet": { "type": "SINGLE", "picks": {}, "stake": 1000 },
            "result": { "start": "LEFT", "lines": 9, "end": "RIGHT" }
        }));

        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(
            response.body.errors,
            Some(vec![
                "picks must include at least one of start/lines/end".to_string(),
                "result.lines must be 3 or 4".to_string(),
            ])
        );
        assert!(response.body.settlement.is_none());
    }

    #[test]
    fn test_body_as_bet_without_result() {
        let response = handle(json!({ "type": "SINGLE", "picks": { "end": "RIGHT" }, "stake": 100 }));

        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.body.errors.map(|e| e.len()), Some(3));
    }

    #[test]
    fn test_non_object_bet_and_result_name_every_rule() {
        let response = handle(json!({ "bet": 42, "result": "LEFT" }));

        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert!(response.body.error.is_none());
        assert_eq!(
            response.body.errors,
            Some(vec![
                "type must be SINGLE or COMBO3".to_string(),
                "stake must be integer >= 100".to_string(),
                "picks must include at least one of start/lines/end".to_string(),
                "result.start must be LEFT or RIGHT".to_string(),
                "result.lines must be 3 or 4".to_string(),
                "result.end must be LEFT or RIGHT".to_string(),
            ])
        );
    }

    #[test]
    fn test_non_object_picks_reported_as_empty() {
        let response = handle(json!({
            "bet": { "type": "SINGLE", "picks": "LEFT", "stake": 50 },
            "result": { "start": "LEFT", "lines": 3, "end": "RIGHT" }
        }));

        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(
            response.body.errors,
            Some(vec![
                "stake must be integer >= 100".to_string(),
                "picks must include at least one of start/lines/end".to_string(),
            ])
        );
    }

    #[test]
    fn test_integral_float_lines_settle() {
        let response = handle(json!({
            "bet": { "type": "SINGLE", "picks": { "lines": 3.0 }, "stake": 1000 },
            "result": { "start": "LEFT", "lines": 3.0, "end": "RIGHT" }
        }));
        assert_eq!(response.status, STATUS_OK);
        assert!(response.body.settlement.unwrap().win);

        let response = handle(json!({
            "bet": { "type": "SINGLE", "picks": { "lines": 3.0 }, "stake": 1000 },
            "result": { "start": "LEFT", "lines": 4.0, "end": "RIGHT" }
        }));
        assert_eq!(response.status, STATUS_OK);
        assert!(!response.body.settlement.unwrap().win);
    }

    #[test]
    fn test_raw_malformed_json() {
        let response = handle_raw_request("{not json", &AdapterConfig::default());

        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert!(response.body.error.unwrap().starts_with("malformed JSON"));
    }

    #[test]
    fn test_raw_too_large() {
        let config = AdapterConfig {
            max_request_bytes: 16,
            ..AdapterConfig::default()
        };
        let response = handle_raw_request(r#"{"bet":{"type":"SINGLE"}}"#, &config);

        assert_eq!(response.status, STATUS_PAYLOAD_TOO_LARGE);
        assert_eq!(response.body.error.as_deref(), Some("request exceeds 16 bytes"));
    }

    #[test]
    fn test_receipt_included_when_enabled() {
        let config = AdapterConfig {
            include_receipt: true,
            ..AdapterConfig::default()
        };
        let raw = r#"{"bet":{"type":"SINGLE","picks":{"start":"LEFT"},"stake":1000},
                      "result":{"start":"LEFT","lines":3,"end":"RIGHT"}}"#;

        let first = handle_raw_request(raw, &config);
        let second = handle_raw_request(raw, &config);

        assert_eq!(first.status, STATUS_OK);
        let receipt = first.body.receipt.clone().unwrap();
        assert_eq!(receipt.len(), 64);
        assert_eq!(first, second);
    }
}
