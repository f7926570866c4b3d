pub mod rest;
pub mod tmdb;

pub use rest::RestApi;
pub use tmdb::{TmdbConfig, TmdbProvider, DEFAULT_API_BASE, DEFAULT_IMAGE_BASE};
