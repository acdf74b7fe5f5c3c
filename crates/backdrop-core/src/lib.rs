pub mod camera;
pub mod constants;
pub mod frame;
pub mod geo;
pub mod globe;
pub mod mesh;
pub mod rain;
pub mod starfield;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::*;
pub use constants::*;
pub use frame::*;
pub use geo::*;
pub use globe::*;
pub use rain::*;
pub use starfield::*;
