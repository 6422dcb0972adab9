pub mod catalog_loader;
pub mod catalog_store;
pub mod classifier;
pub mod m3u_parser;
pub mod metrics;
pub mod renderer;
