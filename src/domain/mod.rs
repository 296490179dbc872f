// Domain layer: models, plain-data HTTP types and ports (interfaces).

pub mod http;
pub mod model;
pub mod ports;
