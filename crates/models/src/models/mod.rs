pub mod crop;
pub mod crop_health;
pub mod dashboard;
pub mod farm;
pub mod financial;
pub mod recommendation;
pub mod regional;
pub mod satellite;
pub mod task;
pub mod weather;
