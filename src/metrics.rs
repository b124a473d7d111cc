use lazy_static::lazy_static;
use prometheus::{
    IntCounterVec, IntGaugeVec, register_int_counter_vec, register_int_gauge_vec,
};

// Registered once per process; the labels carry the limiter/quota name.
lazy_static! {
    pub static ref ADMITTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gateway_admitted_total",
        "Requests admitted by a limiter or quota",
        &["limiter"]
    )
    .unwrap();
    pub static ref REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gateway_rejected_total",
        "Requests rejected by a limiter or quota",
        &["limiter"]
    )
    .unwrap();
    pub static ref TRACKED_KEYS: IntGaugeVec = register_int_gauge_vec!(
        "gateway_limiter_tracked_keys",
        "Identities currently holding request history",
        &["limiter"]
    )
    .unwrap();
    pub static ref SWEPT_KEYS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "gateway_limiter_swept_keys_total",
        "Identities dropped by the background sweep",
        &["limiter"]
    )
    .unwrap();
}

pub fn record_admitted(limiter: &str) {
    ADMITTED_TOTAL.with_label_values(&[limiter]).inc();
}

pub fn record_rejected(limiter: &str) {
    REJECTED_TOTAL.with_label_values(&[limiter]).inc();
}
