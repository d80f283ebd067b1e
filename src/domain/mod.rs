// Domain layer: area models and the transport port.

pub mod model;
pub mod ports;
