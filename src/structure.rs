use ahash::AHashMap;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

/// Per-country BBAN/IBAN layout: lengths plus the half-open byte ranges of
/// the bank, branch and account sub-fields. Ranges are BBAN-relative; the
/// engine re-bases them with the handler's `BbanKind` shift before slicing
/// the stored IBAN string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IbanStructure {
    pub bban_spec: String,
    pub iban_spec: String,
    pub bban_length: usize,
    pub iban_length: usize,
    pub account_code: (usize, usize),
    pub bank_code: (usize, usize),
    pub branch_code: (usize, usize),
    pub overridden: bool,
}

impl IbanStructure {
    pub fn bank_code_len(&self) -> usize {
        self.bank_code.1 - self.bank_code.0
    }

    pub fn branch_code_len(&self) -> usize {
        self.branch_code.1 - self.branch_code.0
    }

    pub fn account_code_len(&self) -> usize {
        self.account_code.1 - self.account_code.0
    }

    /// Merges an override entry: non-empty specs and non-zero lengths win,
    /// and the three field ranges are replaced as a unit as soon as any of
    /// them is given, so an override can never partially blank a layout.
    pub fn merge_override(&mut self, other: &IbanStructure) {
        if !other.bban_spec.is_empty() {
            self.bban_spec = other.bban_spec.clone();
        }

        if !other.iban_spec.is_empty() {
            self.iban_spec = other.iban_spec.clone();
        }

        if other.bban_length > 0 {
            self.bban_length = other.bban_length;
        }

        if other.iban_length > 0 {
            self.iban_length = other.iban_length;
        }

        if other.account_code.1 > 0 || other.bank_code.1 > 0 || other.branch_code.1 > 0 {
            self.account_code = other.account_code;
            self.bank_code = other.bank_code;
            self.branch_code = other.branch_code;
        }

        self.overridden = true;
    }
}

/// Serde shape of one structure record as carried by the override/base
/// JSON documents (`loader` module). Field ranges come in as 2-element
/// arrays; absent fields leave the base value untouched on merge.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct IbanStructureRecord {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub bban_spec: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub iban_spec: String,
    #[serde(default)]
    pub bban_length: usize,
    #[serde(default)]
    pub iban_length: usize,
    #[serde(default)]
    pub account_code: (usize, usize),
    #[serde(default)]
    pub bank_code: (usize, usize),
    #[serde(default)]
    pub branch_code: (usize, usize),
}

impl From<IbanStructureRecord> for IbanStructure {
    fn from(record: IbanStructureRecord) -> Self {
        IbanStructure {
            bban_spec: record.bban_spec,
            iban_spec: record.iban_spec,
            bban_length: record.bban_length,
            iban_length: record.iban_length,
            account_code: record.account_code,
            bank_code: record.bank_code,
            branch_code: record.branch_code,
            overridden: false,
        }
    }
}

/// Country-keyed structure lookup, built once from the generated base
/// table plus optional overrides, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct IbanStructureTable {
    entries: AHashMap<String, IbanStructure>,
}

impl IbanStructureTable {
    /// The built-in table generated from the IBAN registry.
    pub fn builtin() -> Self {
        let mut entries = AHashMap::with_capacity(BASE_TABLE.len());
        for row in BASE_TABLE {
            entries.insert(row.0.to_string(), row_to_structure(row));
        }
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, IbanStructure)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, country_code: &str) -> Option<&IbanStructure> {
        self.entries.get(country_code)
    }

    /// Applies an override set field-by-field on top of the current table.
    /// Countries absent from the base table are inserted as-is.
    pub fn apply_overrides(&mut self, overrides: impl IntoIterator<Item = (String, IbanStructure)>) {
        for (country, patch) in overrides {
            match self.entries.get_mut(&country) {
                Some(entry) => entry.merge_override(&patch),
                None => {
                    let mut entry = patch;
                    entry.overridden = true;
                    self.entries.insert(country, entry);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type StructureRow = (
    &'static str, // country
    &'static str, // bban spec
    usize,        // bban length
    usize,        // iban length
    (usize, usize), // bank code
    (usize, usize), // branch code
    (usize, usize), // account code
);

fn row_to_structure(row: &StructureRow) -> IbanStructure {
    IbanStructure {
        bban_spec: row.1.to_string(),
        iban_spec: format!("{}2!n{}", row.0, row.1),
        bban_length: row.2,
        iban_length: row.3,
        bank_code: row.4,
        branch_code: row.5,
        account_code: row.6,
        overridden: false,
    }
}

// Generated from the IBAN registry: branchless countries anchor the empty
// branch range at the end of the bank range, and the account range runs
// from there to the end of the BBAN (national check digits included).
// The CEMAC/French-zone territories reuse the French layout.
#[rustfmt::skip]
const BASE_TABLE: &[StructureRow] = &[
    ("AD", "4!n4!n12!c",         20, 24, (0, 4), (4, 8),   (8, 20)),
    ("AE", "3!n16!n",            19, 23, (0, 3), (3, 3),   (3, 19)),
    ("AL", "8!n16!c",            24, 28, (0, 8), (3, 7),   (8, 24)),
    ("AT", "5!n11!n",            16, 20, (0, 5), (5, 5),   (5, 16)),
    ("AZ", "4!a20!c",            24, 28, (0, 4), (4, 4),   (4, 24)),
    ("BA", "3!n3!n8!n2!n",       16, 20, (0, 3), (3, 6),   (6, 16)),
    ("BE", "3!n7!n2!n",          12, 16, (0, 3), (3, 3),   (3, 12)),
    ("BG", "4!a4!n2!n8!c",       18, 22, (0, 4), (4, 8),   (8, 18)),
    ("BH", "4!a14!c",            18, 22, (0, 4), (4, 4),   (4, 18)),
    ("BR", "8!n5!n10!n1!a1!c",   25, 29, (0, 8), (8, 13),  (13, 25)),
    ("BY", "4!c4!n16!c",         24, 28, (0, 4), (4, 4),   (4, 24)),
    ("CF", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("CG", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("CH", "5!n12!c",            17, 21, (0, 5), (5, 5),   (5, 17)),
    ("CR", "4!n14!n",            18, 22, (0, 4), (4, 4),   (4, 18)),
    ("CY", "3!n5!n16!c",         24, 28, (0, 3), (3, 8),   (8, 24)),
    ("CZ", "4!n6!n10!n",         20, 24, (0, 4), (4, 4),   (4, 20)),
    ("DE", "8!n10!n",            18, 22, (0, 8), (8, 8),   (8, 18)),
    ("DJ", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("DK", "4!n9!n1!n",          14, 18, (0, 4), (4, 4),   (4, 14)),
    ("DO", "4!c20!n",            24, 28, (0, 4), (4, 4),   (4, 24)),
    ("EE", "2!n2!n11!n1!n",      16, 20, (0, 2), (2, 2),   (2, 16)),
    ("EG", "4!n4!n17!n",         25, 29, (0, 4), (4, 8),   (8, 25)),
    ("ES", "4!n4!n1!n1!n10!n",   20, 24, (0, 4), (4, 8),   (8, 20)),
    ("FI", "3!n11!n",            14, 18, (0, 3), (3, 3),   (3, 14)),
    ("FO", "4!n9!n1!n",          14, 18, (0, 4), (4, 4),   (4, 14)),
    ("FR", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("GA", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("GB", "4!a6!n8!n",          18, 22, (0, 4), (4, 10),  (10, 18)),
    ("GE", "2!a16!n",            18, 22, (0, 2), (2, 2),   (2, 18)),
    ("GI", "4!a15!c",            19, 23, (0, 4), (4, 4),   (4, 19)),
    ("GL", "4!n9!n1!n",          14, 18, (0, 4), (4, 4),   (4, 14)),
    ("GQ", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("GR", "3!n4!n16!c",         23, 27, (0, 3), (3, 7),   (7, 23)),
    ("GT", "4!c20!c",            24, 28, (0, 4), (4, 4),   (4, 24)),
    ("HR", "7!n10!n",            17, 21, (0, 7), (7, 7),   (7, 17)),
    ("HU", "3!n4!n1!n15!n1!n",   24, 28, (0, 3), (3, 7),   (7, 24)),
    ("IE", "4!a6!n8!n",          18, 22, (0, 4), (4, 10),  (10, 18)),
    ("IL", "3!n3!n13!n",         19, 23, (0, 3), (3, 6),   (6, 19)),
    ("IQ", "4!a3!n12!n",         19, 23, (0, 4), (4, 7),   (7, 19)),
    ("IS", "4!n2!n6!n10!n",      22, 26, (0, 2), (2, 4),   (4, 22)),
    ("IT", "1!a5!n5!n12!c",      23, 27, (1, 6), (6, 11),  (11, 23)),
    ("JO", "4!a4!n18!c",         26, 30, (0, 4), (4, 8),   (8, 26)),
    ("KM", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("KW", "4!a22!c",            26, 30, (0, 4), (4, 4),   (4, 26)),
    ("KZ", "3!n13!c",            16, 20, (0, 3), (3, 3),   (3, 16)),
    ("LB", "4!n20!c",            24, 28, (0, 4), (4, 4),   (4, 24)),
    ("LC", "4!a24!c",            28, 32, (0, 4), (4, 4),   (4, 28)),
    ("LI", "5!n12!c",            17, 21, (0, 5), (5, 5),   (5, 17)),
    ("LT", "5!n11!n",            16, 20, (0, 5), (5, 5),   (5, 16)),
    ("LU", "3!n13!c",            16, 20, (0, 3), (3, 3),   (3, 16)),
    ("LV", "4!a13!c",            17, 21, (0, 4), (4, 4),   (4, 17)),
    ("MC", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("MD", "2!c18!c",            20, 24, (0, 2), (2, 2),   (2, 20)),
    ("ME", "3!n13!n2!n",         18, 22, (0, 3), (3, 3),   (3, 18)),
    ("MK", "3!n10!c2!n",         15, 19, (0, 3), (3, 3),   (3, 15)),
    ("MR", "5!n5!n11!n2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("MT", "4!a5!n18!c",         27, 31, (0, 4), (4, 9),   (9, 27)),
    ("MU", "4!a2!n2!n12!n3!n3!a", 26, 30, (0, 6), (6, 8),  (8, 26)),
    ("NL", "4!a10!n",            14, 18, (0, 4), (4, 4),   (4, 14)),
    ("NO", "4!n6!n1!n",          11, 15, (0, 4), (4, 4),   (4, 11)),
    ("PK", "4!c16!n",            20, 24, (0, 4), (4, 4),   (4, 20)),
    ("PL", "8!n16!n",            24, 28, (0, 8), (8, 8),   (8, 24)),
    ("PS", "4!a21!c",            25, 29, (0, 4), (4, 4),   (4, 25)),
    ("PT", "4!n4!n11!n2!n",      21, 25, (0, 4), (4, 8),   (8, 21)),
    ("QA", "4!a21!c",            25, 29, (0, 4), (4, 4),   (4, 25)),
    ("RO", "4!a16!c",            20, 24, (0, 4), (4, 4),   (4, 20)),
    ("RS", "3!n13!n2!n",         18, 22, (0, 3), (3, 3),   (3, 18)),
    ("SA", "2!n18!c",            20, 24, (0, 2), (2, 2),   (2, 20)),
    ("SC", "4!a2!n2!n16!n3!a",   27, 31, (0, 6), (6, 8),   (8, 27)),
    ("SE", "3!n16!n1!n",         20, 24, (0, 3), (3, 3),   (3, 20)),
    ("SI", "5!n8!n2!n",          15, 19, (0, 5), (5, 5),   (5, 15)),
    ("SK", "4!n6!n10!n",         20, 24, (0, 4), (4, 4),   (4, 20)),
    ("SM", "1!a5!n5!n12!c",      23, 27, (1, 6), (6, 11),  (11, 23)),
    ("ST", "4!n4!n11!n2!n",      21, 25, (0, 4), (4, 8),   (8, 21)),
    ("SV", "4!a20!n",            24, 28, (0, 4), (4, 4),   (4, 24)),
    ("TD", "5!n5!n11!c2!n",      23, 27, (0, 5), (5, 10),  (10, 23)),
    ("TL", "3!n14!n2!n",         19, 23, (0, 3), (3, 3),   (3, 19)),
    ("TN", "2!n3!n13!n2!n",      20, 24, (0, 2), (2, 5),   (5, 20)),
    ("TR", "5!n1!n16!c",         22, 26, (0, 5), (5, 5),   (5, 22)),
    ("UA", "6!n19!c",            25, 29, (0, 6), (6, 6),   (6, 25)),
    ("VA", "3!n15!n",            18, 22, (0, 3), (3, 3),   (3, 18)),
    ("VG", "4!a16!n",            20, 24, (0, 4), (4, 4),   (4, 20)),
    ("XK", "4!n10!n2!n",         16, 20, (0, 2), (2, 4),   (4, 16)),
];
