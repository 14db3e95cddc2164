// Domain layer: token/URI models, the target app templates and the ports the pipeline depends on.

pub mod model;
pub mod ports;
pub mod target;
