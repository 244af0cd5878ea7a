use thiserror::Error;

/// Failures surfaced by construction-time strictness and by reference-data
/// integrity problems. Structural/checksum invalidity of user input is
/// reported through the boolean predicates instead, so a caller can always
/// build an `Iban` permissively and inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IbanError {
    #[error("invalid iban")]
    InvalidIban,

    #[error("invalid bban")]
    InvalidBban,

    #[error("national account format not recognized")]
    PreformatFailed,

    #[error("invalid bank code size")]
    InvalidBankCodeLength,

    #[error("invalid branch code size")]
    InvalidBranchCodeLength,

    #[error("invalid account code size")]
    InvalidAccountCodeLength,

    #[error("no iban structure for country {0}")]
    UnknownCountry(String),

    /// The bank registry names a checksum algorithm this library does not
    /// implement. This is a data-integrity fault, not an input fault.
    #[error("{country} checksum algorithm unknown: {id}")]
    UnknownChecksumAlgorithm { country: String, id: String },

    #[error("invalid bic")]
    InvalidBic,

    #[error("no bic found for bank code")]
    BicNotFound,

    #[error("bank code maps to more than one bic")]
    BicAmbiguous,

    #[error("malformed registry data: {0}")]
    Registry(String),
}
