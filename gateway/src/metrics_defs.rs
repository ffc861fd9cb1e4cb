use shared::metrics_defs::{MetricDef, MetricType};

pub const REQUESTS_ROUTED: MetricDef = MetricDef {
    name: "gateway.requests.routed",
    metric_type: MetricType::Counter,
    description: "Requests dispatched to a handler. Tagged with action.",
};

pub const REQUESTS_UNROUTED: MetricDef = MetricDef {
    name: "gateway.requests.unrouted",
    metric_type: MetricType::Counter,
    description: "Requests that matched no route and were answered 404.",
};

pub const CRM_FAILURES: MetricDef = MetricDef {
    name: "gateway.crm.failures",
    metric_type: MetricType::Counter,
    description: "CRM calls that returned non-2xx or failed at the transport level.",
};
