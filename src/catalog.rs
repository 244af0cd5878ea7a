use std::sync::Arc;

use ahash::AHashMap;
use lazy_static::lazy_static;
use metrics::counter;
use regex::Regex;

use crate::bban::{BbanHandler, BbanKind, ExtValidator};
use crate::bic::{BankEntry, BankRegistry, Bic};
use crate::country::CountryRegistry;
use crate::countries;
use crate::error::IbanError;
use crate::iban::{check_prefix, Iban};
use crate::structure::{IbanStructure, IbanStructureTable};

lazy_static! {
    static ref NOT_IBAN_ALPHABET: Regex = Regex::new("[^0-9A-Z]").unwrap();
    static ref NOT_BBAN_ALPHABET: Regex = Regex::new("[^0-9A-Za-z]").unwrap();
}

/// Immutable snapshot of the reference tables plus the per-country handler
/// instances, built once by [`CatalogBuilder`] and shared behind an `Arc`.
/// After publication nothing is mutated, so any number of threads may use
/// it concurrently without locking.
pub struct Catalog {
    countries: CountryRegistry,
    banks: Arc<BankRegistry>,
    structures: IbanStructureTable,
    handlers: AHashMap<String, Arc<dyn BbanHandler>>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn countries(&self) -> &CountryRegistry {
        &self.countries
    }

    pub fn banks(&self) -> &BankRegistry {
        &self.banks
    }

    pub fn structures(&self) -> &IbanStructureTable {
        &self.structures
    }

    /// Country-handler lookup by exact uppercase code. `None` means "no
    /// country-specific validation available"; callers fall back to the
    /// generic length-only checks and identity transforms.
    pub fn handler(&self, country_code: &str) -> Option<&dyn BbanHandler> {
        self.handlers.get(country_code).map(|h| h.as_ref())
    }

    /// Builds an IBAN from a free-form string: every byte outside the IBAN
    /// alphabet is dropped (the standard mandates capital letters, so
    /// lowercase is not promoted here). With `allow_invalid` the value is
    /// built regardless and the predicates tell the story; `validate_bban`
    /// additionally runs the matched country handler.
    pub fn iban_from_str(
        self: &Arc<Self>,
        text: &str,
        allow_invalid: bool,
        validate_bban: bool,
    ) -> Result<Iban, IbanError> {
        let stripped = NOT_IBAN_ALPHABET.replace_all(text, "").into_owned();
        let iban = Iban::from_canonical(stripped, Arc::clone(self));

        if !allow_invalid && !iban.is_valid() {
            return Err(IbanError::InvalidIban);
        }

        if validate_bban && !iban.is_valid_bban()? {
            return Err(IbanError::InvalidBban);
        }

        Ok(iban)
    }

    /// Builds an IBAN from a country code and a national account string in
    /// any of the presentations the country handler understands.
    pub fn iban_from_bban(
        self: &Arc<Self>,
        country_code: &str,
        bban: &str,
        validate_bban: bool,
    ) -> Result<Iban, IbanError> {
        let country_code = country_code.trim().to_ascii_uppercase();
        let stripped = NOT_BBAN_ALPHABET
            .replace_all(bban, "")
            .to_ascii_uppercase();

        self.assemble(&country_code, &stripped, validate_bban)
    }

    /// Builds an IBAN from its national parts. Bank and branch must match
    /// the registered field widths exactly; the account may be shorter and
    /// is right-aligned into a zero-filled slot.
    pub fn iban_from_parts(
        self: &Arc<Self>,
        country_code: &str,
        bank_code: &str,
        branch_code: &str,
        account_code: &str,
        validate_bban: bool,
    ) -> Result<Iban, IbanError> {
        let country_code = country_code.trim().to_ascii_uppercase();
        let structure = self
            .structures
            .get(&country_code)
            .ok_or_else(|| IbanError::UnknownCountry(country_code.clone()))?;

        if bank_code.len() != structure.bank_code_len() {
            return Err(IbanError::InvalidBankCodeLength);
        }

        if branch_code.len() != structure.branch_code_len() {
            return Err(IbanError::InvalidBranchCodeLength);
        }

        if account_code.len() > structure.account_code_len() {
            return Err(IbanError::InvalidAccountCodeLength);
        }

        let mut bban: Vec<u8> = vec![b'0'; structure.bban_length];
        splice(&mut bban, structure.bank_code.0, bank_code);
        splice(&mut bban, structure.branch_code.0, branch_code);
        // right-aligned: leading zeros of the slot survive
        splice(
            &mut bban,
            structure.account_code.1 - account_code.len(),
            account_code,
        );

        let bban = String::from_utf8(bban)
            .map_err(|_| IbanError::PreformatFailed)?
            .to_ascii_uppercase();

        self.assemble(&country_code, &bban, validate_bban)
    }

    /// Shared tail of the BBAN-based construction paths: preformat through
    /// the country handler, then derive the 4-character check prefix
    /// (unless the local format already carries it).
    fn assemble(
        self: &Arc<Self>,
        country_code: &str,
        bban: &str,
        validate_bban: bool,
    ) -> Result<Iban, IbanError> {
        let handler = self.handler(country_code);

        let (kind, formatted) = match handler {
            Some(handler) => {
                let formatted = handler.preformat(bban).ok_or_else(|| {
                    counter!(
                        "iban.preformat.unrecognized",
                        "country" => country_code.to_string()
                    )
                    .increment(1);
                    IbanError::PreformatFailed
                })?;
                (handler.kind(), formatted)
            }
            None => (BbanKind::National, bban.to_string()),
        };

        let iban = match kind {
            BbanKind::National => {
                let prefix = check_prefix(country_code, &formatted)
                    .ok_or(IbanError::PreformatFailed)?;
                format!("{}{}", prefix, formatted)
            }
            // the preformatted text already carries the check digits
            BbanKind::IbanNoCountry => format!("{}{}", country_code, formatted),
            BbanKind::Iban => formatted,
        };

        let iban = Iban::from_canonical(iban, Arc::clone(self));

        if validate_bban && !iban.is_valid_bban()? {
            return Err(IbanError::InvalidBban);
        }

        Ok(iban)
    }

    /// Strict reverse lookup: resolves (country, bank code) to one BIC.
    pub fn bic_from_bank_code(
        &self,
        country_code: &str,
        bank_code: &str,
        allow_multiple: bool,
    ) -> Result<Bic, IbanError> {
        Bic::from_bank_code_strict(&self.banks, country_code, bank_code, allow_multiple)
    }

    /// Multi-valued reverse lookup: the full candidate set.
    pub fn bics_from_bank_code(
        &self,
        country_code: &str,
        bank_code: &str,
    ) -> std::collections::BTreeSet<Bic> {
        Bic::from_bank_code(&self.banks, country_code, bank_code)
    }
}

fn splice(bban: &mut [u8], at: usize, part: &str) {
    bban[at..at + part.len()].copy_from_slice(part.as_bytes());
}

/// Load-then-freeze construction of a [`Catalog`]. All reference data is
/// collected first; `build` wires the country handlers and publishes the
/// immutable snapshot, which closes the loader/reader race the mutable
/// singleton design would have.
pub struct CatalogBuilder {
    countries: CountryRegistry,
    structures: IbanStructureTable,
    overrides: Vec<(String, IbanStructure)>,
    banks: Vec<BankEntry>,
    ext_hooks: AHashMap<String, Arc<ExtValidator>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            countries: CountryRegistry::builtin(),
            structures: IbanStructureTable::builtin(),
            overrides: Vec::new(),
            banks: Vec::new(),
            ext_hooks: AHashMap::new(),
        }
    }

    /// Replaces the built-in ISO country table.
    pub fn countries(mut self, countries: CountryRegistry) -> Self {
        self.countries = countries;
        self
    }

    /// Replaces the built-in structure base table.
    pub fn structures(mut self, structures: IbanStructureTable) -> Self {
        self.structures = structures;
        self
    }

    /// Queues a structure override set, applied field-by-field on top of
    /// the base table at build time.
    pub fn structure_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (String, IbanStructure)>,
    ) -> Self {
        self.overrides.extend(overrides);
        self
    }

    /// Appends bank-registry entries.
    pub fn banks(mut self, entries: impl IntoIterator<Item = BankEntry>) -> Self {
        self.banks.extend(entries);
        self
    }

    /// Installs a bank-level extension predicate for one country; it
    /// becomes that handler's `is_valid_ext`.
    pub fn ext_validator(
        mut self,
        country_code: &str,
        validator: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.ext_hooks
            .insert(country_code.to_ascii_uppercase(), Arc::new(validator));
        self
    }

    pub fn build(self) -> Arc<Catalog> {
        let mut structures = self.structures;
        structures.apply_overrides(self.overrides);

        let banks = Arc::new(BankRegistry::from_entries(self.banks));
        let mut ext_hooks = self.ext_hooks;
        let handlers = countries::build_handlers(&structures, &banks, &mut ext_hooks);

        Arc::new(Catalog {
            countries: self.countries,
            banks,
            structures,
            handlers,
        })
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
