// Domain layer: request/result models and the ports the service is wired through.

pub mod model;
pub mod ports;
