pub mod camera;
pub mod instance;
pub mod layer;
pub mod view;
