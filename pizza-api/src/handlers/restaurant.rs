use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use pizza_store::RestaurantRepository;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::models::*;
use crate::serializer::serialize_restaurant_details;

use super::AppState;

const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

/// Ids that cannot be stored in the `restaurants` table name no restaurant.
fn restaurant_id(id: i64) -> Result<i32, ApiError> {
    i32::try_from(id).map_err(|_| ApiError::NotFound(RESTAURANT_NOT_FOUND.to_string()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [Restaurant]),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = state
        .db
        .transaction(|conn| RestaurantRepository::new(conn).get_all())?;

    Ok(Json(restaurants.into_iter().map(Restaurant::from).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizzas", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let id = restaurant_id(id)?;
    let details = state.db.transaction(|conn| {
        let restaurant = RestaurantRepository::new(conn).get_by_id(id)?;
        restaurant
            .map(|restaurant| serialize_restaurant_details(conn, restaurant))
            .transpose()
    })?;

    details
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(RESTAURANT_NOT_FOUND.to_string()))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza prices deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i64, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(id)?;
    let deleted = state
        .db
        .transaction(|conn| RestaurantRepository::new(conn).delete_by_id(id))?;

    if deleted == 0 {
        return Err(ApiError::NotFound(RESTAURANT_NOT_FOUND.to_string()));
    }

    info!(id, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use pizza_store::{PizzaRepository, RestaurantPizzaRepository, RestaurantRepository};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::test_support::{read_json, setup_database};

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_restaurants() {
        let (_dir, db) = setup_database();
        let restaurants = db
            .transaction(|conn| {
                let mut repo = RestaurantRepository::new(conn);
                repo.create("Karen's Pizza Shack", "address1")?;
                repo.create("Sanjay's Pizza", "address2")?;
                repo.get_all()
            })
            .unwrap();

        let response = crate::app(db).oneshot(get("/restaurants")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = read_json(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), restaurants.len());
        for (item, restaurant) in items.iter().zip(&restaurants) {
            assert_eq!(item["id"], restaurant.id);
            assert_eq!(item["name"], restaurant.name.as_str());
            assert_eq!(item["address"], restaurant.address.as_str());
            assert!(item.get("restaurant_pizzas").is_none());
        }
    }

    #[tokio::test]
    async fn test_get_restaurant_includes_restaurant_pizzas() {
        let (_dir, db) = setup_database();
        let (restaurant, pizza) = db
            .transaction(|conn| {
                let restaurant =
                    RestaurantRepository::new(conn).create("Kiki's Pizza", "address3")?;
                let pizza =
                    PizzaRepository::new(conn).create("Emma", "Dough, Tomato Sauce, Cheese")?;
                RestaurantPizzaRepository::new(conn).create(5, restaurant.id, pizza.id)?;
                Ok((restaurant, pizza))
            })
            .unwrap();

        let response = crate::app(db)
            .oneshot(get(&format!("/restaurants/{}", restaurant.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["id"], restaurant.id);
        assert_eq!(body["name"], "Kiki's Pizza");
        assert_eq!(body["address"], "address3");

        let restaurant_pizzas = body["restaurant_pizzas"].as_array().unwrap();
        assert_eq!(restaurant_pizzas.len(), 1);
        assert_eq!(restaurant_pizzas[0]["price"], 5);
        assert_eq!(restaurant_pizzas[0]["pizza"]["id"], pizza.id);
        assert_eq!(restaurant_pizzas[0]["pizza"]["name"], "Emma");
        assert_eq!(restaurant_pizzas[0]["restaurant"]["name"], "Kiki's Pizza");
    }

    #[tokio::test]
    async fn test_get_restaurant_without_pizzas_has_empty_list() {
        let (_dir, db) = setup_database();
        let restaurant = db
            .transaction(|conn| RestaurantRepository::new(conn).create("Empty Oven", "Nowhere"))
            .unwrap();

        let response = crate::app(db)
            .oneshot(get(&format!("/restaurants/{}", restaurant.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["restaurant_pizzas"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn test_get_missing_restaurant_returns_404() {
        let (_dir, db) = setup_database();

        let response = crate::app(db).oneshot(get("/restaurants/0")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = read_json(response).await;
        assert_eq!(body["error"], "Restaurant not found");
    }

    #[tokio::test]
    async fn test_delete_restaurant_cascades() {
        let (_dir, db) = setup_database();
        let restaurant = db
            .transaction(|conn| {
                let restaurant =
                    RestaurantRepository::new(conn).create("Sanjay's Pizza", "address2")?;
                let pizza = PizzaRepository::new(conn)
                    .create("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni")?;
                RestaurantPizzaRepository::new(conn).create(4, restaurant.id, pizza.id)?;
                Ok(restaurant)
            })
            .unwrap();

        let response = crate::app(db.clone())
            .oneshot(delete(&format!("/restaurants/{}", restaurant.id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());

        let (found, remaining) = db
            .with_connection(|conn| {
                let found = RestaurantRepository::new(conn).get_by_id(restaurant.id)?;
                let remaining = RestaurantPizzaRepository::new(conn).count()?;
                Ok((found, remaining))
            })
            .unwrap();
        assert!(found.is_none());
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_restaurant_returns_404() {
        let (_dir, db) = setup_database();

        let response = crate::app(db)
            .oneshot(delete("/restaurants/999999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body, serde_json::json!({ "error": "Restaurant not found" }));
    }

    #[tokio::test]
    async fn test_out_of_range_id_returns_404() {
        let (_dir, db) = setup_database();
        let app = crate::app(db);

        for request in [
            get("/restaurants/3000000000"),
            delete("/restaurants/3000000000"),
            get("/restaurants/-3000000000"),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = read_json(response).await;
            assert_eq!(body, serde_json::json!({ "error": "Restaurant not found" }));
        }
    }
}
