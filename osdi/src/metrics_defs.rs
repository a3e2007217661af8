//! Metrics definitions for the aggregation pipeline.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

impl MetricType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "Counter",
            MetricType::Histogram => "Histogram",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub description: &'static str,
}

#[macro_export]
macro_rules! counter {
    ($def:expr) => {
        metrics::counter!($def.name)
    };
}

#[macro_export]
macro_rules! histogram {
    ($def:expr) => {
        metrics::histogram!($def.name)
    };
}

pub const ROSTER_CACHE_HIT: MetricDef = MetricDef {
    name: "roster_cache.hit",
    metric_type: MetricType::Counter,
    description: "Number of roster requests served from the cache",
};

pub const ROSTER_CACHE_MISS: MetricDef = MetricDef {
    name: "roster_cache.miss",
    metric_type: MetricType::Counter,
    description: "Number of roster requests that missed the cache",
};

pub const PERSON_LOOKUP_FAILURES: MetricDef = MetricDef {
    name: "aggregate.person_lookup.failures",
    metric_type: MetricType::Counter,
    description: "Number of person lookups dropped after an upstream failure",
};

pub const LISTING_PAGES: MetricDef = MetricDef {
    name: "aggregate.listing.pages",
    metric_type: MetricType::Histogram,
    description: "Number of listing pages fetched per aggregation",
};

pub const AGGREGATE_DURATION: MetricDef = MetricDef {
    name: "aggregate.duration",
    metric_type: MetricType::Histogram,
    description: "Time to complete an aggregation in seconds",
};

pub const ALL_METRICS: &[MetricDef] = &[
    ROSTER_CACHE_HIT,
    ROSTER_CACHE_MISS,
    PERSON_LOOKUP_FAILURES,
    LISTING_PAGES,
    AGGREGATE_DURATION,
];
