pub mod account;
pub mod auth;
pub mod barbershop;
pub mod client;
pub mod dashboard;
pub mod offering;
