// Domain layer: catalog and conversation models plus the ports the core depends on.

pub mod model;
pub mod ports;
