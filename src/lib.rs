pub mod client;
pub mod configuration;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod startup;
pub mod store;
pub mod telementry;
