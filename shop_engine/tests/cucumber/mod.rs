mod setups;
mod shop_world;

pub use shop_world::ShopWorld;
