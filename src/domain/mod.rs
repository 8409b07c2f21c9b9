// Domain layer: models, the portal selector map and the ports (traits) the workflow depends on.

pub mod model;
pub mod ports;
pub mod selectors;
