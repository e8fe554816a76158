pub mod featurize;
pub mod generation;
pub mod manager;
pub mod traits;

pub use featurize::FeaturizeConfig;
pub use generation::GenerationConfig;
pub use manager::{AppConfig, ConfigManager};
pub use traits::ConfigSection;
