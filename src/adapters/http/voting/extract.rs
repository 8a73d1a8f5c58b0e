//! JSON body extraction with the API's error envelope.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::domain::foundation::ErrorCode;

use super::dto::ErrorResponse;

/// `Json<T>` whose rejections answer with an [`ErrorResponse`].
///
/// Unparseable bodies and bodies that do not fit `T` are both
/// `400 VALIDATION_FAILED`. Other rejections keep their status.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

/// Rejection for [`ValidJson`].
#[derive(Debug)]
pub struct InvalidBody {
    status: StatusCode,
    message: String,
}

impl From<JsonRejection> for InvalidBody {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new(ErrorCode::ValidationFailed, self.message);
        (self.status, Json(error)).into_response()
    }
}

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InvalidBody;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ValidJson(value))
    }
}
