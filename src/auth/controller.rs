use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use crate::auth::command::login_user_cmd::{LoginUserCommand, LoginUserCommandRequest, LoginUserCommandResponse};
use crate::auth::command::register_user_cmd::{RegisterUserCommand, RegisterUserCommandRequest, RegisterUserCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

pub(crate) async fn register_user(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<(StatusCode, Json<RegisterUserCommandResponse>), ServerError> {
    let req: RegisterUserCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = RegisterUserCommand::new(state.auth.clone()).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn login_user(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<LoginUserCommandResponse>, ServerError> {
    let req: LoginUserCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = LoginUserCommand::new(state.auth.clone()).execute(req).await?;
    Ok(Json(res))
}
