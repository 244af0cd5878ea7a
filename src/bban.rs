use std::sync::Arc;

use crate::bic::BankRegistry;
use crate::error::IbanError;
use crate::structure::IbanStructure;

/// Shape of the national "BBAN" as presented locally. The variant decides
/// the byte shift applied when mapping the BBAN-relative structure ranges
/// onto the full IBAN string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BbanKind {
    /// Ordinary local account format.
    #[default]
    National,
    /// Local format matches the IBAN layout minus the 2-letter country.
    IbanNoCountry,
    /// The local format is itself a full IBAN string.
    Iban,
}

impl BbanKind {
    pub fn shift(&self) -> usize {
        match self {
            BbanKind::National => 0,
            BbanKind::IbanNoCountry => 2,
            BbanKind::Iban => 4,
        }
    }
}

/// Caller-supplied bank-level predicate hooked into `is_valid_ext`.
pub type ExtValidator = dyn Fn(&str) -> bool + Send + Sync;

/// Shared state of every country handler: the country code, that
/// country's layout entry and the bank registry snapshot, plus the
/// optional extension hook installed through the builder.
pub struct HandlerContext {
    pub(crate) country: String,
    pub(crate) structure: IbanStructure,
    pub(crate) banks: Arc<BankRegistry>,
    pub(crate) ext: Option<Arc<ExtValidator>>,
}

impl HandlerContext {
    pub(crate) fn new(country: &str, structure: IbanStructure, banks: Arc<BankRegistry>) -> Self {
        Self {
            country: country.to_string(),
            structure,
            banks,
            ext: None,
        }
    }
}

/// Per-country validation/formatting pipeline. Validation is split into
/// independent facets so callers can tell which aspect of an account
/// number is wrong, and so unusual countries override only the facets
/// that differ from the generic defaults.
pub trait BbanHandler: Send + Sync {
    fn context(&self) -> &HandlerContext;

    fn country(&self) -> &str {
        &self.context().country
    }

    fn structure(&self) -> &IbanStructure {
        &self.context().structure
    }

    fn kind(&self) -> BbanKind {
        BbanKind::National
    }

    /// Full validation: length, checksum, bank code, extension hook, in
    /// that order, short-circuiting. Only the checksum facet can abort
    /// (unknown per-bank algorithm id, a data-integrity fault).
    fn is_valid(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }
        if !self.is_valid_checksum(bban)? {
            return Ok(false);
        }
        if !self.is_valid_bankcode(bban) {
            return Ok(false);
        }
        Ok(self.is_valid_ext(bban))
    }

    fn is_valid_length(&self, bban: &str) -> bool {
        bban.len() == self.structure().bban_length + self.kind().shift()
    }

    /// Absence of a known algorithm must not read as valid.
    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(false)
    }

    /// Confirms the bank-code sub-field exists in the bank registry. When
    /// the registry holds no data at all for the country this degrades to
    /// "cannot verify, pass" rather than failing every account.
    fn is_valid_bankcode(&self, bban: &str) -> bool {
        let ctx = self.context();
        if !ctx.banks.has_entries_for(&ctx.country) {
            return true;
        }

        let shift = self.kind().shift();
        let (lo, hi) = ctx.structure.bank_code;
        match bban.get(lo + shift..hi + shift) {
            Some(bank_code) => !ctx.banks.entries_for(&ctx.country, bank_code).is_empty(),
            None => false,
        }
    }

    /// Bank-level rules outside this engine's scope; replaced per country
    /// through the catalog builder.
    fn is_valid_ext(&self, bban: &str) -> bool {
        match &self.context().ext {
            Some(hook) => hook(bban),
            None => true,
        }
    }

    /// Normalizes a national presentation to the fixed-width BBAN the
    /// engine expects. `None` flags unrecognized input.
    fn preformat(&self, bban: &str) -> Option<String> {
        Some(bban.to_string())
    }

    /// Cuts the BBAN to its short national form where one exists.
    fn trim(&self, bban: &str) -> String {
        bban.to_string()
    }

    /// Renders the BBAN the way the country writes account numbers.
    fn format(&self, bban: &str) -> String {
        bban.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bic::BankEntry;
    use crate::structure::IbanStructureTable;

    struct PlainHandler {
        ctx: HandlerContext,
    }

    impl BbanHandler for PlainHandler {
        fn context(&self) -> &HandlerContext {
            &self.ctx
        }
    }

    fn handler_with_banks(entries: Vec<BankEntry>) -> PlainHandler {
        let structure = IbanStructureTable::builtin().get("DE").unwrap().clone();
        PlainHandler {
            ctx: HandlerContext::new("DE", structure, Arc::new(BankRegistry::from_entries(entries))),
        }
    }

    fn gls_entry() -> BankEntry {
        BankEntry {
            country_code: "DE".to_string(),
            bank_code: "43060967".to_string(),
            name: "GLS".to_string(),
            short_name: "GLS".to_string(),
            bic: "GENODEM1GLS".to_string(),
            primary: true,
            checksum_algo: None,
        }
    }

    #[test]
    fn kind_shifts() {
        assert_eq!(BbanKind::National.shift(), 0);
        assert_eq!(BbanKind::IbanNoCountry.shift(), 2);
        assert_eq!(BbanKind::Iban.shift(), 4);
    }

    #[test]
    fn default_checksum_is_not_silently_valid() {
        let handler = handler_with_banks(vec![]);
        assert_eq!(handler.is_valid_checksum("430609670000000000"), Ok(false));
        assert_eq!(handler.is_valid("430609670000000000"), Ok(false));
    }

    #[test]
    fn bankcode_soft_fails_without_registry_data() {
        let handler = handler_with_banks(vec![]);
        assert!(handler.is_valid_bankcode("430609670000000000"));
    }

    #[test]
    fn bankcode_checked_against_registry() {
        let handler = handler_with_banks(vec![gls_entry()]);
        assert!(handler.is_valid_bankcode("430609670000000000"));
        assert!(!handler.is_valid_bankcode("999999990000000000"));
    }

    #[test]
    fn default_transforms_are_identity() {
        let handler = handler_with_banks(vec![]);
        assert_eq!(handler.preformat("x").as_deref(), Some("x"));
        assert_eq!(handler.trim("x"), "x");
        assert_eq!(handler.format("x"), "x");
    }
}
