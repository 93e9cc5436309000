use axum::{Router, extract::State, response::Json, routing::get};
use pizza_store::PizzaRepository;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [Pizza]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let pizzas = state
        .db
        .transaction(|conn| PizzaRepository::new(conn).get_all())?;

    Ok(Json(pizzas.into_iter().map(Pizza::from).collect()))
}
