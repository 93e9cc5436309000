use diesel::{insert_into, prelude::*, SqliteConnection};

use crate::models::{NewPizza, Pizza};
use crate::schema::pizzas;
use crate::StoreResult;

pub struct PizzaRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PizzaRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn create(&mut self, name: &str, ingredients: &str) -> StoreResult<Pizza> {
        let pizza = insert_into(pizzas::table)
            .values(NewPizza { name, ingredients })
            .returning(Pizza::as_returning())
            .get_result(self.conn)?;
        Ok(pizza)
    }

    pub fn get_all(&mut self) -> StoreResult<Vec<Pizza>> {
        let results = pizzas::table
            .order(pizzas::id.asc())
            .select(Pizza::as_select())
            .load(self.conn)?;
        Ok(results)
    }

    pub fn get_by_id(&mut self, id: i32) -> StoreResult<Option<Pizza>> {
        let result = pizzas::table
            .find(id)
            .select(Pizza::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }
}
