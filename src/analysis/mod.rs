pub mod classifier;
pub mod config;
pub mod history;
pub mod risk;
pub mod stats;
pub mod threshold;

pub use classifier::{Classification, Classifier, PolicyKind};
pub use config::AnalysisConfig;
