pub mod auth;
pub mod employees;
pub mod enterprises;
pub mod products;
pub mod roles;
pub mod users;
