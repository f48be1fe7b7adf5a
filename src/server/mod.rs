pub mod app;
mod deserializers;
pub mod error;
mod extractors;
pub mod pagination;
mod routes;
