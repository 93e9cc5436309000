use diesel::{insert_into, prelude::*, SqliteConnection};
use tracing::debug;

use crate::models::{NewRestaurant, Restaurant};
use crate::schema::restaurants;
use crate::StoreResult;

pub struct RestaurantRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> RestaurantRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn create(&mut self, name: &str, address: &str) -> StoreResult<Restaurant> {
        let restaurant = insert_into(restaurants::table)
            .values(NewRestaurant { name, address })
            .returning(Restaurant::as_returning())
            .get_result(self.conn)?;
        Ok(restaurant)
    }

    pub fn get_all(&mut self) -> StoreResult<Vec<Restaurant>> {
        let results = restaurants::table
            .order(restaurants::id.asc())
            .select(Restaurant::as_select())
            .load(self.conn)?;
        Ok(results)
    }

    pub fn get_by_id(&mut self, id: i32) -> StoreResult<Option<Restaurant>> {
        let result = restaurants::table
            .find(id)
            .select(Restaurant::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }

    /// Removes the restaurant and, through the foreign key, its restaurant pizzas.
    /// Returns how many restaurants were deleted; a missing id is not an error.
    pub fn delete_by_id(&mut self, id: i32) -> StoreResult<usize> {
        let deleted = diesel::delete(restaurants::table.find(id)).execute(self.conn)?;
        debug!(id, deleted, "deleted restaurant");
        Ok(deleted)
    }
}
