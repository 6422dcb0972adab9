//! Prometheus metrics registered in the default registry
//!
//! Exposed by `GET /metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

lazy_static! {
    /// Catalog loads by outcome: primary, fallback, failed
    pub static ref CATALOG_LOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "catalog_loads_total",
        "Catalog load attempts by outcome",
        &["outcome"]
    )
    .unwrap();

    /// Channels in the active catalog
    pub static ref CATALOG_CHANNELS: IntGauge =
        register_int_gauge!("catalog_channels", "Channels in the active catalog").unwrap();

    pub static ref RENDER_BATCHES_TOTAL: IntCounter =
        register_int_counter!("render_batches_total", "Render batches appended to the grid")
            .unwrap();

    pub static ref RENDERS_SUPERSEDED_TOTAL: IntCounter = register_int_counter!(
        "renders_superseded_total",
        "Renders abandoned because a newer render started"
    )
    .unwrap();
}
