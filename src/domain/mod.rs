// Domain layer: the record model and the pipeline port.

pub mod model;
pub mod ports;
