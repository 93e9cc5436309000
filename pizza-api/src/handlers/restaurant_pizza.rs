use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use pizza_store::{RestaurantPizzaRepository, repository::PRICE_RANGE_MESSAGE};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models::*;
use crate::serializer::serialize_restaurant_pizza;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Pizza price created", body = RestaurantPizza),
        (
            status = 400,
            description = "Invalid price or missing field",
            body = ValidationErrorResponse
        ),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizza>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::Validation(vec![e.body_text()]))?;

    let (price, restaurant_id, pizza_id) =
        match (payload.price, payload.restaurant_id, payload.pizza_id) {
            (Some(price), Some(restaurant_id), Some(pizza_id)) => (price, restaurant_id, pizza_id),
            (price, restaurant_id, pizza_id) => {
                let missing = [
                    ("price", price.is_none()),
                    ("restaurant_id", restaurant_id.is_none()),
                    ("pizza_id", pizza_id.is_none()),
                ]
                .into_iter()
                .filter(|(_, missing)| *missing)
                .map(|(field, _)| format!("{field} is required"))
                .collect();
                return Err(ApiError::Validation(missing));
            }
        };

    let price = i32::try_from(price)
        .map_err(|_| ApiError::Validation(vec![PRICE_RANGE_MESSAGE.to_string()]))?;

    let restaurant_pizza = state.db.transaction(|conn| {
        let created =
            RestaurantPizzaRepository::new(conn).create(price, restaurant_id, pizza_id)?;
        serialize_restaurant_pizza(conn, created)
    })?;

    info!(id = restaurant_pizza.id, "restaurant pizza created");
    Ok((StatusCode::CREATED, Json(restaurant_pizza)))
}
