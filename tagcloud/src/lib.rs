//! Presentation data for weighted tag clouds: sizes, colours, order and
//! interaction handlers, ready for a host to paint.

pub mod cloud;
pub mod color;
pub mod config;
pub mod error;
pub mod font_size;
pub mod handlers;
pub mod render;
pub mod seed;
pub mod shuffle;
pub mod tag;

pub use cloud::{AnnotatedTag, CloudProps, TagCloud};
pub use color::{ColorGenerator, ColorOptions, FixedPalette, RandomColor};
pub use config::{CloudConfig, ConfigError, HostAttributes};
pub use error::CloudError;
pub use handlers::{CloudHandlers, ElementHandlers, EventKind, InteractionEvent};
pub use render::{CloudView, TagElement, TagRenderer};
pub use seed::RandomSeed;
pub use shuffle::RandomNumberGenerator;
pub use tag::{Tag, TagProps};
