use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub store_mutations_total: IntCounterVec,
    pub auth_attempts_total: IntCounterVec,
    pub collection_records: IntGaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let store_mutations_total = IntCounterVec::new(
            Opts::new(
                "store_mutations_total",
                "Store mutations that changed state, by collection and operation",
            ),
            &["collection", "operation"],
        )
        .expect("valid store_mutations_total metric");

        let auth_attempts_total = IntCounterVec::new(
            Opts::new("auth_attempts_total", "Login attempts by role and outcome"),
            &["role", "outcome"],
        )
        .expect("valid auth_attempts_total metric");

        let collection_records = IntGaugeVec::new(
            Opts::new("collection_records", "Current number of records per collection"),
            &["collection"],
        )
        .expect("valid collection_records metric");

        registry
            .register(Box::new(store_mutations_total.clone()))
            .expect("register store_mutations_total");
        registry
            .register(Box::new(auth_attempts_total.clone()))
            .expect("register auth_attempts_total");
        registry
            .register(Box::new(collection_records.clone()))
            .expect("register collection_records");

        Self {
            registry,
            store_mutations_total,
            auth_attempts_total,
            collection_records,
        }
    }

    pub fn record_mutation(&self, collection: &str, operation: &str) {
        self.store_mutations_total
            .with_label_values(&[collection, operation])
            .inc();
    }

    pub fn record_auth(&self, role: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.auth_attempts_total
            .with_label_values(&[role, outcome])
            .inc();
    }

    pub fn set_records(&self, collection: &str, count: usize) {
        self.collection_records
            .with_label_values(&[collection])
            .set(count as i64);
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
