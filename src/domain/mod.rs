// Domain layer: speaker model and ports. No HTTP or file system code here.

pub mod model;
pub mod ports;
pub mod target;
