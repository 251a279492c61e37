use serde::Serialize;

use warehouse_core::ErrorReason;

// -------------------------
// Response envelopes
// -------------------------

/// Outcome of a quantity change (`order`, `ship`, `restock`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub error_reason: Option<ErrorReason>,
}

impl UpdateResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_reason: None,
        }
    }

    pub fn rejected(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
        }
    }
}

/// Outcome of a create; `model` carries the stored record on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse<T> {
    pub success: bool,
    pub error_reason: Option<ErrorReason>,
    pub model: Option<T>,
}

impl<T> CreateResponse<T> {
    pub fn created(model: T) -> Self {
        Self {
            success: true,
            error_reason: None,
            model: Some(model),
        }
    }

    pub fn rejected(reason: ErrorReason) -> Self {
        Self {
            success: false,
            error_reason: Some(reason),
            model: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_response_shape() {
        assert_eq!(
            serde_json::to_value(UpdateResponse::ok()).unwrap(),
            json!({ "success": true, "errorReason": null })
        );
        assert_eq!(
            serde_json::to_value(UpdateResponse::rejected(ErrorReason::NotEnoughQuantity)).unwrap(),
            json!({ "success": false, "errorReason": "NotEnoughQuantity" })
        );
    }

    #[test]
    fn create_response_shape() {
        assert_eq!(
            serde_json::to_value(CreateResponse::<u8>::rejected(ErrorReason::QuantityInvalid)).unwrap(),
            json!({ "success": false, "errorReason": "QuantityInvalid", "model": null })
        );
        assert_eq!(
            serde_json::to_value(CreateResponse::created(7u8)).unwrap(),
            json!({ "success": true, "errorReason": null, "model": 7 })
        );
    }
}
