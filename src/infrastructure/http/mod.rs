//! HTTP infrastructure
//!
//! Routes, handlers, response formatting and the server itself.

pub mod handlers;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;

pub use responses::{handle_rejection, ResponseFormatter};
pub use routes::RouteBuilder;
pub use server::HttpServer;
