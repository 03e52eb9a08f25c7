#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::ChromLocError;
pub use ir::{Chromosome, Feature, Genome, Strand};
pub use layout::{Layout, compute_layout};
pub use parser::{parse_features, parse_lengths, read_genome};
pub use render::{render_svg, write_output_svg};
pub use theme::Theme;
