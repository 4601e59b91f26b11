/// Raised when a loose filter does not carry exactly one criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Exactly one field must be provided for SearchFilterInput with @oneOf: No field was provided")]
    NoFieldProvided,
    #[error(
        "Exactly one field must be provided for SearchFilterInput with @oneOf: {} fields ({}) were provided",
        .0.len(),
        .0.join(",")
    )]
    MultipleFieldsProvided(Vec<&'static str>),
}
