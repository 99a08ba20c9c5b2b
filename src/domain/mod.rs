// Domain layer: request/response models and the ports the probe is built on.

pub mod model;
pub mod ports;
