// Domain layer: wire models and the remote-service port.

pub mod model;
pub mod ports;
