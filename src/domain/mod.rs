// Domain layer: the order model, query shapes and ports. No I/O here.

pub mod model;
pub mod ports;
