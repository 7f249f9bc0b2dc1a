pub mod catalog;
pub mod evaluate;
pub mod health;
