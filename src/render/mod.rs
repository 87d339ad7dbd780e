pub mod renderer;

pub use renderer::{Renderer, Status};
