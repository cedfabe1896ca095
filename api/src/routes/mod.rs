pub mod chat;
pub mod home_route;
