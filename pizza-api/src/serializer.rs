use pizza_store::{
    PizzaRepository, RestaurantPizzaRepository, RestaurantRepository, SqliteConnection,
    StoreResult, models,
};

use crate::models::{Pizza, Restaurant, RestaurantDetails, RestaurantPizza};

impl From<models::Restaurant> for Restaurant {
    fn from(r: models::Restaurant) -> Self {
        Restaurant {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl From<models::Pizza> for Pizza {
    fn from(p: models::Pizza) -> Self {
        Pizza {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

/// Expands an association with its restaurant and pizza, loaded fresh from the
/// store. Both are `None` unless both parents exist.
pub fn serialize_restaurant_pizza(
    conn: &mut SqliteConnection,
    restaurant_pizza: models::RestaurantPizza,
) -> StoreResult<RestaurantPizza> {
    let restaurant = RestaurantRepository::new(conn).get_by_id(restaurant_pizza.restaurant_id)?;
    let pizza = PizzaRepository::new(conn).get_by_id(restaurant_pizza.pizza_id)?;

    let (restaurant, pizza) = match (restaurant, pizza) {
        (Some(restaurant), Some(pizza)) => {
            (Some(Restaurant::from(restaurant)), Some(Pizza::from(pizza)))
        }
        _ => (None, None),
    };

    Ok(RestaurantPizza {
        id: restaurant_pizza.id,
        price: restaurant_pizza.price,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza_id: restaurant_pizza.pizza_id,
        restaurant,
        pizza,
    })
}

pub fn serialize_restaurant_details(
    conn: &mut SqliteConnection,
    restaurant: models::Restaurant,
) -> StoreResult<RestaurantDetails> {
    let restaurant_pizzas =
        RestaurantPizzaRepository::new(conn).get_by_restaurant_id(restaurant.id)?;
    let restaurant_pizzas = restaurant_pizzas
        .into_iter()
        .map(|rp| serialize_restaurant_pizza(conn, rp))
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(RestaurantDetails {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas,
    })
}
