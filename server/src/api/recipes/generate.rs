use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{ButtonState, RecipeError, StructuredRecipe};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    /// Names of the pantry items to cook with.
    #[serde(default)]
    pub selected_items: Vec<String>,
    /// Number of previous generations; selects the prompt style. Must be a non-negative integer.
    #[serde(default)]
    #[schema(value_type = u32)]
    pub button_state: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerateRecipeResponse {
    #[schema(value_type = Object)]
    pub recipe: StructuredRecipe,
}

/// Generate a recipe from pantry items
///
/// Identical ingredient sets (in any order) with the same button state return the
/// cached recipe without calling the model again.
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Generated recipe", body = GenerateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "AI service unavailable", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(generator): State<AppState>,
    body: Result<Json<GenerateRecipeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected recipe request body");
            return error_response(&RecipeError::InvalidArgument(rejection.body_text()))
                .into_response();
        }
    };

    let button_state = match ButtonState::from_json(&request.button_state) {
        Ok(state) => state,
        Err(e) => return error_response(&e).into_response(),
    };

    match generator
        .generate(&request.selected_items, button_state)
        .await
    {
        Ok(recipe) => (StatusCode::OK, Json(GenerateRecipeResponse { recipe })).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

fn error_response(err: &RecipeError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        RecipeError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        RecipeError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::ai::FakeAiClient;
    use pantry_core::{GeneratorOptions, RecipeGenerator};
    use serde_json::json;
    use std::sync::Arc;

    fn state(client: FakeAiClient) -> AppState {
        Arc::new(RecipeGenerator::new(
            Arc::new(client),
            GeneratorOptions::default(),
        ))
    }

    fn request(body: serde_json::Value) -> Result<Json<GenerateRecipeRequest>, JsonRejection> {
        Ok(Json(serde_json::from_value(body).unwrap()))
    }

    #[tokio::test]
    async fn test_generate_ok() {
        let state = state(FakeAiClient::with_sample_recipe());
        let response = generate_recipe(
            State(state.clone()),
            request(json!({"selectedItems": ["eggs", "spinach"], "buttonState": 0})),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_button_state() {
        for button_state in [json!(-1), json!(1.5), json!("two"), json!(null)] {
            let response = generate_recipe(
                State(state(FakeAiClient::with_sample_recipe())),
                request(json!({"selectedItems": ["eggs"], "buttonState": button_state})),
            )
            .await
            .into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_ingredients() {
        let response = generate_recipe(
            State(state(FakeAiClient::with_sample_recipe())),
            request(json!({"selectedItems": [], "buttonState": 0})),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_upstream_failure() {
        let response = generate_recipe(
            State(state(FakeAiClient::failing("timed out"))),
            request(json!({"selectedItems": ["eggs"], "buttonState": 2})),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_body() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let state = state(FakeAiClient::with_sample_recipe());
        for body in [
            r#"{"selectedItems": "eggs", "buttonState": 0}"#,
            r#"{"selectedItems": ["eggs"]"#,
        ] {
            let req = Request::builder()
                .method("POST")
                .uri("/api/recipes")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap();
            let extracted = Json::<GenerateRecipeRequest>::from_request(req, &()).await;
            assert!(extracted.is_err());

            let response = generate_recipe(State(state.clone()), extracted)
                .await
                .into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert!(body["error"].as_str().unwrap().starts_with("Invalid argument: "));
        }
        assert!(state.cache().is_empty());
    }

    #[test]
    fn test_error_body_is_generic() {
        let (status, Json(body)) = error_response(&RecipeError::UpstreamUnavailable);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.error, "Failed to generate recipe");
    }
}
