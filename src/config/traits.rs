use crate::error::FreqgenError;

/// A named, independently validatable section of the application config.
pub trait ConfigSection {
    fn section_name() -> &'static str;

    fn validate(&self) -> Result<(), FreqgenError>;
}
