use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// Pizzas served by the restaurant, with their prices
    pub restaurant_pizzas: Vec<RestaurantPizza>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pizza {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Comma separated list of ingredients
    pub ingredients: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizza {
    pub id: i32,
    /// Price between 1 and 30
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
    /// `null` when the restaurant or the pizza no longer exists
    pub restaurant: Option<Restaurant>,
    /// `null` when the restaurant or the pizza no longer exists
    pub pizza: Option<Pizza>,
}

/// Fields are optional so that a missing one is reported as a validation
/// error instead of a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30. Read as `i64` so that any out of range
    /// number gets the same validation message.
    pub price: Option<i64>,
    pub restaurant_id: Option<i32>,
    pub pizza_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Validation error messages
    pub errors: Vec<String>,
}
