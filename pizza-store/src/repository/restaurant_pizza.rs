use diesel::{insert_into, prelude::*, SqliteConnection};

use crate::models::{NewRestaurantPizza, RestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::{StoreError, StoreResult};

pub const MIN_PRICE: i32 = 1;
pub const MAX_PRICE: i32 = 30;
pub const PRICE_RANGE_MESSAGE: &str = "Price must be between 1 and 30";

const MISSING_PARENT_MESSAGE: &str = "Restaurant or pizza does not exist";

pub struct RestaurantPizzaRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> RestaurantPizzaRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Prices outside `MIN_PRICE..=MAX_PRICE` are rejected before anything is written.
    pub fn create(
        &mut self,
        price: i32,
        restaurant_id: i32,
        pizza_id: i32,
    ) -> StoreResult<RestaurantPizza> {
        if !(MIN_PRICE..=MAX_PRICE).contains(&price) {
            return Err(StoreError::Validation(PRICE_RANGE_MESSAGE.to_string()));
        }

        insert_into(restaurant_pizzas::table)
            .values(NewRestaurantPizza {
                price,
                restaurant_id,
                pizza_id,
            })
            .returning(RestaurantPizza::as_returning())
            .get_result(self.conn)
            .map_err(|e| match StoreError::from(e) {
                err if err.is_foreign_key_violation() => {
                    StoreError::Validation(MISSING_PARENT_MESSAGE.to_string())
                }
                err => err,
            })
    }

    pub fn get_by_id(&mut self, id: i32) -> StoreResult<Option<RestaurantPizza>> {
        let result = restaurant_pizzas::table
            .find(id)
            .select(RestaurantPizza::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }

    /// Associations of one restaurant. The joins only filter out rows whose
    /// parents are gone; the parents themselves are not loaded.
    pub fn get_by_restaurant_id(
        &mut self,
        restaurant_id: i32,
    ) -> StoreResult<Vec<RestaurantPizza>> {
        let results = restaurant_pizzas::table
            .inner_join(restaurants::table)
            .inner_join(pizzas::table)
            .filter(restaurant_pizzas::restaurant_id.eq(restaurant_id))
            .order(restaurant_pizzas::id.asc())
            .select(RestaurantPizza::as_select())
            .load(self.conn)?;
        Ok(results)
    }

    pub fn count(&mut self) -> StoreResult<i64> {
        let count = restaurant_pizzas::table.count().get_result(self.conn)?;
        Ok(count)
    }
}
