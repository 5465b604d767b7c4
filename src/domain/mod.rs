// Domain layer: models and ports. No knowledge of HTTP or storage details.

pub mod model;
pub mod ports;
