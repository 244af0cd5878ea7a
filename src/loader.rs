//! Reference-data ingestion.
//!
//! The engine does no file I/O of its own: callers read the registry
//! documents however they like and hand the JSON text here. The shapes
//! mirror the published bank-registry and IBAN-registry documents.

use std::collections::BTreeMap;

use crate::bic::BankEntry;
use crate::error::IbanError;
use crate::structure::{IbanStructure, IbanStructureRecord};

/// Parses a bank-registry document: a JSON array of entries carrying at
/// least the country, the domestic bank code and the BIC, optionally a
/// per-bank checksum-algorithm id.
pub fn load_bank_registry(json: &str) -> Result<Vec<BankEntry>, IbanError> {
    serde_json::from_str(json).map_err(|e| IbanError::Registry(e.to_string()))
}

/// Parses a structure document: a country-keyed map of layout records,
/// usable both as a base table and as an override set.
pub fn load_structures(json: &str) -> Result<Vec<(String, IbanStructure)>, IbanError> {
    let records: BTreeMap<String, IbanStructureRecord> =
        serde_json::from_str(json).map_err(|e| IbanError::Registry(e.to_string()))?;

    Ok(records
        .into_iter()
        .map(|(country, record)| (country, record.into()))
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::catalog::Catalog;

    const BANKS: &str = r#"[
        {
            "country_code": "HU",
            "bank_code": "11764379",
            "name": "OTP Győr-Moson-S. m. Külföldiek Devizái",
            "short_name": "OTP",
            "bic": "OTPVHUHB",
            "primary": true
        },
        {
            "country_code": "DE",
            "bank_code": "37040044",
            "name": "Commerzbank Köln",
            "short_name": "Commerzbank",
            "bic": "COBADEFFXXX",
            "primary": true,
            "checksum_algo": "09"
        }
    ]"#;

    #[test]
    fn bank_registry_round_trip() {
        let entries = load_bank_registry(BANKS).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].checksum_algo, None);
        assert_eq!(entries[1].checksum_algo.as_deref(), Some("09"));

        let catalog = Catalog::builder().banks(entries).build();
        assert!(catalog.banks().has_entries_for("HU"));
        assert_eq!(catalog.banks().entries_for("DE", "37040044").len(), 1);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(matches!(
            load_bank_registry("{"),
            Err(IbanError::Registry(_))
        ));
        assert!(matches!(load_structures("[1,2]"), Err(IbanError::Registry(_))));
    }

    #[test]
    fn structure_overrides_parse_and_apply() {
        let json = r#"{
            "HU": { "bban_length": 24, "iban_length": 28 },
            "ZZ": {
                "bban_spec": "4!n",
                "bban_length": 4,
                "iban_length": 8,
                "account_code": [0, 4],
                "bank_code": [0, 0],
                "branch_code": [0, 0]
            }
        }"#;

        let overrides = load_structures(json).unwrap();
        let catalog = Catalog::builder().structure_overrides(overrides).build();

        assert!(catalog.structures().get("HU").unwrap().overridden);
        assert_eq!(catalog.structures().get("ZZ").unwrap().bban_length, 4);
    }
}
