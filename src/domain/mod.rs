// Domain layer: identity/MRZ models and ports (interfaces).

pub mod model;
pub mod ports;
