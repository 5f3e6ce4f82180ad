// Domain layer: request/response models and the transport port.

pub mod model;
pub mod params;
pub mod ports;
