// This blocks accidental use of `println`. If one is actually needed, you can
// override with `#[allow(clippy::print_stdout)]`.
#![deny(clippy::print_stdout)]

mod bban;
mod bic;
mod catalog;
mod checksum;
mod countries;
mod country;
mod error;
mod iban;
mod loader;
mod structure;

#[cfg(feature = "capi")]
pub mod capi;

// This is the public API of the engine
pub use bban::{BbanHandler, BbanKind, ExtValidator};
pub use bic::{BankEntry, BankRegistry, Bic, BicType};
pub use catalog::{Catalog, CatalogBuilder};
pub use country::{CountryInfo, CountryRegistry};
pub use error::IbanError;
pub use iban::Iban;
pub use loader::{load_bank_registry, load_structures};
pub use structure::{IbanStructure, IbanStructureRecord, IbanStructureTable};
