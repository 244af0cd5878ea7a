use std::collections::BTreeSet;
use std::fmt;

use ahash::{AHashMap, AHashSet};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use strum::{Display, EnumString};

use crate::country::CountryRegistry;
use crate::error::IbanError;

lazy_static! {
    // bank (4 alpha), country (2 alpha), location (2 alnum), branch (3 alnum)
    static ref BIC_STRUCTURE: Regex =
        Regex::new("^[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}[A-Z0-9]{3}$").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum BicType {
    Default,
    Testing,
    Passive,
    ReverseBilling,
}

/// Canonical 11-character BIC. Short 8-character codes are right-padded
/// with `XXX` on ingestion, so equality transparently matches a short code
/// against its no-branch 11-character form.
#[derive(Debug, Clone)]
pub struct Bic {
    code: String,   // always 11 chars
    is_short: bool, // original input had 8 chars
}

// comparisons run on the padded code, so the short form and the XXX
// branch form of one institution collapse
impl PartialEq for Bic {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Bic {}

impl PartialOrd for Bic {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bic {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code.cmp(&other.code)
    }
}

impl Bic {
    /// Parses a BIC, rejecting structurally invalid codes.
    pub fn new(bic: &str) -> Result<Self, IbanError> {
        let bic = Self::new_permissive(bic);
        if !bic.is_valid_structure() || !bic.is_valid_length() {
            return Err(IbanError::InvalidBic);
        }
        Ok(bic)
    }

    /// Parses a BIC without validation; inspect the predicates afterwards.
    pub fn new_permissive(bic: &str) -> Self {
        let mut code = WHITESPACE.replace_all(bic, "").to_ascii_uppercase();
        let is_short = code.len() == 8;
        if is_short {
            code.push_str("XXX");
        }
        Self { code, is_short }
    }

    /// All distinct BICs associated with a (country, bank code) pair.
    pub fn from_bank_code(banks: &BankRegistry, country: &str, bank_code: &str) -> BTreeSet<Bic> {
        banks
            .entries_for(country, bank_code)
            .iter()
            .map(|entry| Bic::new_permissive(&entry.bic))
            .collect()
    }

    /// Resolves a (country, bank code) pair to a single BIC. Not-found and
    /// ambiguous lookups are distinct errors; pass `allow_multiple` to
    /// accept the first of several candidates instead.
    pub fn from_bank_code_strict(
        banks: &BankRegistry,
        country: &str,
        bank_code: &str,
        allow_multiple: bool,
    ) -> Result<Bic, IbanError> {
        let mut bics = Self::from_bank_code(banks, country, bank_code).into_iter();

        let first = bics.next().ok_or(IbanError::BicNotFound)?;
        if !allow_multiple && bics.next().is_some() {
            return Err(IbanError::BicAmbiguous);
        }

        Ok(first)
    }

    pub fn is_valid(&self, countries: &CountryRegistry) -> bool {
        self.is_valid_length() && self.is_valid_structure() && self.is_valid_country_code(countries)
    }

    pub fn is_valid_length(&self) -> bool {
        // short codes were already padded to 11
        self.code.len() == 11
    }

    pub fn is_valid_structure(&self) -> bool {
        BIC_STRUCTURE.is_match(&self.code)
    }

    pub fn is_valid_country_code(&self, countries: &CountryRegistry) -> bool {
        countries.is_country(self.country_code())
    }

    pub fn is_valid_iban_country_code(&self, countries: &CountryRegistry) -> bool {
        countries.is_iban_country(self.country_code())
    }

    pub fn is_valid_sepa_country_code(&self, countries: &CountryRegistry) -> bool {
        countries.is_sepa_country(self.country_code())
    }

    /// Whether any bank-registry entry carries this BIC.
    pub fn is_existing(&self, banks: &BankRegistry) -> bool {
        !banks.by_bic(&self.code).is_empty()
    }

    /// Domestic bank codes associated with this BIC.
    pub fn domestic_bank_codes(&self, banks: &BankRegistry) -> BTreeSet<String> {
        banks
            .by_bic(&self.code)
            .iter()
            .map(|e| e.bank_code.clone())
            .collect()
    }

    pub fn names(&self, banks: &BankRegistry) -> BTreeSet<String> {
        banks
            .by_bic(&self.code)
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn short_names(&self, banks: &BankRegistry) -> BTreeSet<String> {
        banks
            .by_bic(&self.code)
            .iter()
            .map(|e| e.short_name.clone())
            .collect()
    }

    pub fn bic_type(&self) -> BicType {
        match self.location_code().as_bytes().get(1) {
            Some(b'0') => BicType::Testing,
            Some(b'1') => BicType::Passive,
            Some(b'2') => BicType::ReverseBilling,
            _ => BicType::Default,
        }
    }

    /// Space-separated parts; the branch is omitted for short inputs.
    pub fn formatted(&self) -> String {
        let mut result = format!(
            "{} {} {}",
            self.bank_code(),
            self.country_code(),
            self.location_code()
        );
        if !self.is_short {
            result.push(' ');
            result.push_str(&self.code[8..11]);
        }
        result
    }

    /// The 8-character form when the branch is `XXX`, the full code
    /// otherwise.
    pub fn short_code(&self) -> &str {
        if &self.code[8..11] == "XXX" {
            &self.code[0..8]
        } else {
            &self.code
        }
    }

    pub fn bank_code(&self) -> &str {
        &self.code[0..4]
    }

    pub fn country_code(&self) -> &str {
        &self.code[4..6]
    }

    pub fn location_code(&self) -> &str {
        &self.code[6..8]
    }

    /// `None` when the BIC was ingested in the short form.
    pub fn branch_code(&self) -> Option<&str> {
        if self.is_short {
            None
        } else {
            Some(&self.code[8..11])
        }
    }

    /// The code as entered: short inputs render without the padded branch.
    pub fn as_str(&self) -> &str {
        if self.is_short {
            &self.code[0..8]
        } else {
            &self.code
        }
    }
}

impl fmt::Display for Bic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// One bank-registry record. `checksum_algo` is the per-bank algorithm id
/// used by the jurisdictions whose account checksum is bank-specific.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankEntry {
    pub country_code: String,
    pub bank_code: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub short_name: String,
    pub bic: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub checksum_algo: Option<String>,
}

/// Bank/BIC association table, indexed by full BIC, by 8-character BIC and
/// by (country, bank code). Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct BankRegistry {
    entries: Vec<BankEntry>,
    by_bic: AHashMap<String, Vec<usize>>,
    by_short_bic: AHashMap<String, Vec<usize>>,
    by_code: AHashMap<String, Vec<usize>>,
    countries: AHashSet<String>,
}

impl BankRegistry {
    pub fn from_entries(entries: impl IntoIterator<Item = BankEntry>) -> Self {
        let entries: Vec<BankEntry> = entries.into_iter().collect();
        let mut registry = BankRegistry {
            by_bic: AHashMap::new(),
            by_short_bic: AHashMap::new(),
            by_code: AHashMap::new(),
            countries: AHashSet::new(),
            entries,
        };

        for (index, entry) in registry.entries.iter().enumerate() {
            match entry.bic.len() {
                8 | 11 => {
                    let bic = if entry.bic.len() == 8 {
                        format!("{}XXX", entry.bic)
                    } else {
                        entry.bic.clone()
                    };
                    let short_bic = bic[0..8].to_string();
                    registry.by_bic.entry(bic).or_default().push(index);
                    registry.by_short_bic.entry(short_bic).or_default().push(index);
                }
                _ => {}
            }

            let code = Self::code_key(&entry.country_code, &entry.bank_code);
            registry.by_code.entry(code).or_default().push(index);
            registry.countries.insert(entry.country_code.clone());
        }

        registry
    }

    /// An 11-character query matches exactly; an 8-character query returns
    /// every branch sharing the prefix.
    pub fn by_bic(&self, bic: &str) -> Vec<&BankEntry> {
        let index = match bic.len() {
            8 => self.by_short_bic.get(bic),
            11 => self.by_bic.get(bic),
            _ => None,
        };

        index
            .map(|is| is.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    pub fn entries_for(&self, country_code: &str, bank_code: &str) -> Vec<&BankEntry> {
        self.by_code
            .get(&Self::code_key(country_code, bank_code))
            .map(|is| is.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Distinguishes "this bank code is unknown" from "there is no registry
    /// data for this country at all".
    pub fn has_entries_for(&self, country_code: &str) -> bool {
        self.countries.contains(country_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn code_key(country_code: &str, bank_code: &str) -> String {
        format!("{}:{}", country_code, bank_code)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_registry() -> BankRegistry {
        BankRegistry::from_entries([
            BankEntry {
                country_code: "DE".to_string(),
                bank_code: "43060967".to_string(),
                name: "GLS Gemeinschaftsbank".to_string(),
                short_name: "GLS Bank".to_string(),
                bic: "GENODEM1GLS".to_string(),
                primary: true,
                checksum_algo: Some("00".to_string()),
            },
            BankEntry {
                country_code: "HU".to_string(),
                bank_code: "11764379".to_string(),
                name: "OTP".to_string(),
                short_name: "OTP".to_string(),
                bic: "OTPVHUHB".to_string(),
                primary: true,
                checksum_algo: None,
            },
        ])
    }

    #[test]
    fn short_code_equals_padded_form() {
        let short = Bic::new("OTPVHUHB").unwrap();
        let long = Bic::new("OTPVHUHBXXX").unwrap();
        assert_eq!(short, long);
        // ...even though only the long form exposes a branch
        assert_eq!(short.branch_code(), None);
        assert_eq!(long.branch_code(), Some("XXX"));
    }

    #[test]
    fn padding_and_parts() {
        let bic = Bic::new("OTPVHUHB").unwrap();
        assert_eq!(bic.bank_code(), "OTPV");
        assert_eq!(bic.country_code(), "HU");
        assert_eq!(bic.location_code(), "HB");
        assert_eq!(bic.branch_code(), None);
        assert_eq!(bic.as_str(), "OTPVHUHB");
        assert_eq!(bic.formatted(), "OTPV HU HB");
        assert_eq!(bic.to_string(), "OTPVHUHB");
    }

    #[test]
    fn whitespace_and_case_are_normalized() {
        let bic = Bic::new(" geno dem1 gls ").unwrap();
        assert_eq!(bic.as_str(), "GENODEM1GLS");
    }

    #[test]
    fn structure_is_enforced_when_strict() {
        assert_eq!(Bic::new("1ENODEM1GLS"), Err(IbanError::InvalidBic));
        assert_eq!(Bic::new("GENO"), Err(IbanError::InvalidBic));
        assert!(Bic::new_permissive("GENO").is_valid_structure() == false);
    }

    #[test]
    fn bic_types_from_location_code() {
        assert_eq!(Bic::new("TESTDE10").unwrap().bic_type(), BicType::Testing);
        assert_eq!(Bic::new("TESTDE21").unwrap().bic_type(), BicType::Passive);
        assert_eq!(
            Bic::new("TESTDE32").unwrap().bic_type(),
            BicType::ReverseBilling
        );
        assert_eq!(Bic::new("GENODEFF").unwrap().bic_type(), BicType::Default);
    }

    #[test]
    fn registry_lookups() {
        let registry = sample_registry();
        assert_eq!(registry.by_bic("GENODEM1GLS").len(), 1);
        assert_eq!(registry.by_bic("OTPVHUHB").len(), 1);
        assert_eq!(registry.by_bic("OTPVHUHBXXX").len(), 1);
        assert!(registry.by_bic("NOPE").is_empty());

        assert_eq!(registry.entries_for("DE", "43060967").len(), 1);
        assert!(registry.entries_for("DE", "99999999").is_empty());
        assert!(registry.has_entries_for("HU"));
        assert!(!registry.has_entries_for("FR"));
    }

    #[test]
    fn reverse_lookup_strictness() {
        let registry = sample_registry();
        let bic = Bic::from_bank_code_strict(&registry, "HU", "11764379", false).unwrap();
        assert_eq!(bic.as_str(), "OTPVHUHB");

        assert_eq!(
            Bic::from_bank_code_strict(&registry, "HU", "999", false),
            Err(IbanError::BicNotFound)
        );
    }
}
