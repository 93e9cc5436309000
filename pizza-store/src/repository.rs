mod pizza;
mod restaurant;
mod restaurant_pizza;

pub use pizza::PizzaRepository;
pub use restaurant::RestaurantRepository;
pub use restaurant_pizza::{RestaurantPizzaRepository, MAX_PRICE, MIN_PRICE, PRICE_RANGE_MESSAGE};
