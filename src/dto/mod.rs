pub mod locations;
pub mod orders;
pub mod products;
pub mod suppliers;
