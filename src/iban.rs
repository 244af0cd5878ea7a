use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, BbanKind};
use crate::catalog::Catalog;
use crate::error::IbanError;
use crate::structure::IbanStructure;

lazy_static! {
    // two alpha country chars followed by the two check digits
    static ref IBAN_SHAPE: Regex = Regex::new("^[A-Z]{2}[0-9]{2}.*$").unwrap();
}

/// A canonical IBAN plus the offset where the handler-level BBAN starts
/// inside it (4 for ordinary countries, 2 or 4 less for the countries
/// whose local format is itself IBAN-shaped). Immutable; every accessor
/// is a pure projection over the stored string.
pub struct Iban {
    iban: String,
    bban_start: usize,
    structure: IbanStructure,
    catalog: Arc<Catalog>,
}

impl Iban {
    pub(crate) fn from_canonical(iban: String, catalog: Arc<Catalog>) -> Self {
        let country_code = iban.get(0..2).unwrap_or_default();

        let structure = catalog
            .structures()
            .get(country_code)
            .cloned()
            .unwrap_or_default();

        let kind = catalog
            .handler(country_code)
            .map(|h| h.kind())
            .unwrap_or_default();

        Self {
            iban,
            bban_start: 4 - kind.shift(),
            structure,
            catalog,
        }
    }

    /// Structure, country, length and mod-97 checks together.
    pub fn is_valid(&self) -> bool {
        self.is_valid_structure()
            && self.is_valid_country_code()
            && self.is_valid_length()
            && self.is_valid_iban_checksum()
    }

    pub fn is_valid_length(&self) -> bool {
        if self.iban.len() < 5 || self.iban.len() > 34 {
            return false;
        }

        match self.catalog.structures().get(self.country_code()) {
            Some(structure) => structure.iban_length == self.iban.len(),
            None => false,
        }
    }

    pub fn is_valid_structure(&self) -> bool {
        IBAN_SHAPE.is_match(&self.iban)
    }

    pub fn is_valid_country_code(&self) -> bool {
        self.catalog.countries().is_iban_country(self.country_code())
    }

    /// Recomputes the mod-97 check value from the stored payload; no
    /// validity state is cached.
    pub fn is_valid_iban_checksum(&self) -> bool {
        if self.iban.len() < 5 {
            return false;
        }

        match check_prefix(self.country_code(), &self.iban[4..]) {
            Some(prefix) => self.iban[0..4] == prefix,
            None => false,
        }
    }

    /// Runs the matched country handler over the embedded BBAN. Countries
    /// without a handler degrade to the registered-length check. For the
    /// IBAN-shaped local formats this falls back to full IBAN validation.
    pub fn is_valid_bban(&self) -> Result<bool, IbanError> {
        match self.catalog.handler(self.country_code()) {
            Some(handler) => {
                if handler.kind() == BbanKind::National {
                    handler.is_valid(self.bban())
                } else {
                    Ok(self.is_valid())
                }
            }
            None => match self.catalog.structures().get(self.country_code()) {
                Some(structure) => Ok(self.bban().len() == structure.bban_length),
                None => Ok(false),
            },
        }
    }

    pub fn country_code(&self) -> &str {
        self.iban.get(0..2).unwrap_or_default()
    }

    pub fn iban_checksum(&self) -> &str {
        self.iban.get(2..4).unwrap_or_default()
    }

    pub fn bank_code(&self) -> &str {
        self.field(self.structure.bank_code)
    }

    pub fn branch_code(&self) -> &str {
        self.field(self.structure.branch_code)
    }

    pub fn account_code(&self) -> &str {
        self.field(self.structure.account_code)
    }

    /// The registry-level BBAN: everything after the country and check
    /// digits.
    pub fn bban(&self) -> &str {
        self.iban.get(4..).unwrap_or_default()
    }

    /// The BBAN in its short national form, if the country has one.
    pub fn bban_trimmed(&self) -> String {
        match self.handler() {
            Some(handler) => handler.trim(self.handler_bban()),
            None => self.bban().to_string(),
        }
    }

    /// The BBAN formatted for national presentation.
    pub fn bban_formatted(&self) -> String {
        match self.handler() {
            Some(handler) => handler.format(self.handler_bban()),
            None => self.bban().to_string(),
        }
    }

    /// Short form and national presentation combined.
    pub fn bban_trimmed_formatted(&self) -> String {
        match self.handler() {
            Some(handler) => handler.format(&handler.trim(self.handler_bban())),
            None => self.bban().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.iban
    }

    fn handler(&self) -> Option<&dyn BbanHandler> {
        self.catalog.handler(self.country_code())
    }

    /// The slice the country handler reasons about: includes the check
    /// digits (and country) again for the IBAN-shaped local formats.
    fn handler_bban(&self) -> &str {
        self.iban.get(self.bban_start..).unwrap_or_default()
    }

    /// Structure ranges are BBAN-relative; re-base them onto the stored
    /// string before slicing.
    fn field(&self, range: (usize, usize)) -> &str {
        self.iban.get(4 + range.0..4 + range.1).unwrap_or_default()
    }
}

/// Computes the 4-character IBAN prefix (country + check digits) for a
/// BBAN: ISO 7064 mod-97-10 over `BBAN ∥ country ∥ "00"`, check value
/// `98 - remainder`, zero-padded to two digits. `None` when the input
/// leaves the IBAN alphabet.
pub(crate) fn check_prefix(country_code: &str, bban: &str) -> Option<String> {
    let numeric = crate::checksum::to_numeric(&format!("{}{}00", bban, country_code))?;
    let remainder = crate::checksum::mod97_str(&numeric);
    let check = 98 - remainder;

    Some(format!("{}{:02}", country_code, check))
}

/// Groups the canonical string in blocks of four, the way IBANs are
/// printed.
impl fmt::Display for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, c) in self.iban.chars().enumerate() {
            if p > 0 && p % 4 == 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Iban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iban")
            .field("iban", &self.iban)
            .field("bban_start", &self.bban_start)
            .finish()
    }
}
