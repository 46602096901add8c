use prometheus::{IntCounterVec, Opts, core::Collector};

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUESTS_TOTAL_HELP: &str = "Total HTTP requests";

/// Label dimensions of [`HTTP_REQUESTS_TOTAL`], in declaration order.
pub const REQUEST_LABELS: [&str; 3] = ["method", "route", "status"];

/// Per-request counter partitioned by method, raw request path and status code.
///
/// Every distinct path becomes its own series, so label cardinality grows with
/// the set of paths clients send. Each `(method, route, status)` tuple is backed
/// by its own atomic `u64`.
#[derive(Clone)]
pub struct RequestCounter {
    inner: IntCounterVec,
}

impl RequestCounter {
    pub fn new() -> Result<Self, prometheus::Error> {
        let inner = IntCounterVec::new(
            Opts::new(HTTP_REQUESTS_TOTAL, HTTP_REQUESTS_TOTAL_HELP),
            &REQUEST_LABELS,
        )?;
        Ok(Self { inner })
    }

    /// Add one to the series for this tuple, creating it at zero first if unseen.
    pub fn increment(&self, method: &str, route: &str, status: u16) {
        let status = status.to_string();
        self.inner
            .with_label_values(&[method, route, status.as_str()])
            .inc();
    }

    /// Current value for the tuple; unseen tuples read as zero and are not created.
    pub fn get(&self, method: &str, route: &str, status: u16) -> u64 {
        let status = status.to_string();
        let wanted = [method, route, status.as_str()];

        self.inner
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .find(|metric| {
                let labels = metric.get_label();
                REQUEST_LABELS.iter().zip(wanted).all(|(name, value)| {
                    labels
                        .iter()
                        .any(|label| label.get_name() == *name && label.get_value() == value)
                })
            })
            .map(|metric| metric.get_counter().get_value() as u64)
            .unwrap_or(0)
    }

    pub(crate) fn collector(&self) -> Box<dyn Collector> {
        Box::new(self.inner.clone())
    }
}
