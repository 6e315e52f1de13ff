//! Response writer: JSON payloads and the error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON-encode `data` with the given status. Axum sets `content-type: application/json`.
pub fn json_response<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(data)).into_response()
}

/// Error envelope: `{"error": "<message>"}`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    json_response(
        status,
        ErrorBody {
            error: message.into(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn json_response_sets_status_and_content_type() {
        let resp = json_response(StatusCode::CREATED, serde_json::json!({ "id": 1 }));
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_json(resp).await, serde_json::json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn error_response_wraps_message() {
        let resp = error_response(StatusCode::NOT_FOUND, "user 3 not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({ "error": "user 3 not found" })
        );
    }
}
