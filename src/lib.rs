pub mod config;
pub mod content;
pub mod generator;
pub mod host;
pub mod logging;
pub mod lorem;
pub mod rng;

pub use content::ContentKind;
pub use generator::{Generator, GeneratorError, Payload, TAIL_SIZE};
pub use host::{Datagen, RootModule};
pub use rng::RandomSource;
