use ahash::AHashMap;

/// One ISO 3166 entry plus the two participation flags the engine cares
/// about. The numeric and alpha-3 codes ride along for callers that need
/// to cross-reference other data sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    pub alpha2: &'static str,
    pub alpha3: &'static str,
    pub numeric: &'static str,
    pub name: &'static str,
    pub independent: bool,
    pub non_iso: bool,
    pub uses_iban: bool,
    pub is_sepa: bool,
}

/// Read-only ISO country lookup. Codes are matched case-insensitively;
/// the table is built once and shared behind the catalog.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    by_alpha2: AHashMap<String, CountryInfo>,
}

impl CountryRegistry {
    /// Builds the registry from the built-in ISO table.
    pub fn builtin() -> Self {
        Self::from_entries(COUNTRIES.iter().map(
            |&(alpha2, alpha3, numeric, name, independent, non_iso, uses_iban, is_sepa)| {
                CountryInfo {
                    alpha2,
                    alpha3,
                    numeric,
                    name,
                    independent,
                    non_iso,
                    uses_iban,
                    is_sepa,
                }
            },
        ))
    }

    /// Builds the registry from caller-provided entries, replacing the
    /// built-in table wholesale.
    pub fn from_entries(entries: impl IntoIterator<Item = CountryInfo>) -> Self {
        let by_alpha2 = entries
            .into_iter()
            .map(|info| (info.alpha2.to_ascii_uppercase(), info))
            .collect();
        Self { by_alpha2 }
    }

    pub fn get(&self, code: &str) -> Option<&CountryInfo> {
        self.by_alpha2.get(&code.to_ascii_uppercase())
    }

    pub fn is_country(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn is_iban_country(&self, code: &str) -> bool {
        self.get(code).map(|c| c.uses_iban).unwrap_or(false)
    }

    pub fn is_sepa_country(&self, code: &str) -> bool {
        self.get(code).map(|c| c.is_sepa).unwrap_or(false)
    }
}

type CountryRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
    bool,
    bool,
    bool,
);

// (alpha2, alpha3, numeric, name, independent, non_iso, uses_iban, is_sepa)
#[rustfmt::skip]
const COUNTRIES: &[CountryRow] = &[
    ("AF", "AFG", "004", "Afghanistan", true, false, false, false),
    ("AX", "ALA", "248", "Åland Islands", false, false, false, false),
    ("AL", "ALB", "008", "Albania", true, false, true, false),
    ("DZ", "DZA", "012", "Algeria", true, false, true, false),
    ("AS", "ASM", "016", "American Samoa", false, false, false, false),
    ("AD", "AND", "020", "Andorra", true, false, true, true),
    ("AO", "AGO", "024", "Angola", true, false, true, false),
    ("AI", "AIA", "660", "Anguilla", false, false, false, false),
    ("AQ", "ATA", "010", "Antarctica", false, false, false, false),
    ("AG", "ATG", "028", "Antigua and Barbuda", true, false, false, false),
    ("AR", "ARG", "032", "Argentina", true, false, false, false),
    ("AM", "ARM", "051", "Armenia", true, false, false, false),
    ("AW", "ABW", "533", "Aruba", false, false, false, false),
    ("AU", "AUS", "036", "Australia", true, false, false, false),
    ("AT", "AUT", "040", "Austria", true, false, true, true),
    ("AZ", "AZE", "031", "Azerbaijan", true, false, true, false),
    ("BS", "BHS", "044", "Bahamas", true, false, false, false),
    ("BH", "BHR", "048", "Bahrain", true, false, true, false),
    ("BD", "BGD", "050", "Bangladesh", true, false, false, false),
    ("BB", "BRB", "052", "Barbados", true, false, false, false),
    ("BY", "BLR", "112", "Belarus", true, false, true, false),
    ("BE", "BEL", "056", "Belgium", true, false, true, true),
    ("BZ", "BLZ", "084", "Belize", true, false, false, false),
    ("BJ", "BEN", "204", "Benin", true, false, true, false),
    ("BM", "BMU", "060", "Bermuda", false, false, false, false),
    ("BT", "BTN", "064", "Bhutan", true, false, false, false),
    ("BO", "BOL", "068", "Bolivia (Plurinational State of)", true, false, false, false),
    ("BQ", "BES", "535", "Bonaire, Sint Eustatius and Saba", false, false, false, false),
    ("BA", "BIH", "070", "Bosnia and Herzegovina", true, false, true, false),
    ("BW", "BWA", "072", "Botswana", true, false, false, false),
    ("BV", "BVT", "074", "Bouvet Island", false, false, false, false),
    ("BR", "BRA", "076", "Brazil", true, false, true, false),
    ("IO", "IOT", "086", "British Indian Ocean Territory", false, false, false, false),
    ("BN", "BRN", "096", "Brunei Darussalam", true, false, false, false),
    ("BG", "BGR", "100", "Bulgaria", true, false, true, true),
    ("BF", "BFA", "854", "Burkina Faso", true, false, true, false),
    ("BI", "BDI", "108", "Burundi", true, false, true, false),
    ("CV", "CPV", "132", "Cabo Verde", true, false, true, false),
    ("KH", "KHM", "116", "Cambodia", true, false, false, false),
    ("CM", "CMR", "120", "Cameroon", true, false, true, false),
    ("CA", "CAN", "124", "Canada", true, false, false, false),
    ("KY", "CYM", "136", "Cayman Islands", false, false, false, false),
    ("CF", "CAF", "140", "Central African Republic", true, false, true, false),
    ("TD", "TCD", "148", "Chad", true, false, true, false),
    ("CL", "CHL", "152", "Chile", true, false, false, false),
    ("CN", "CHN", "156", "China", true, false, false, false),
    ("CX", "CXR", "162", "Christmas Island", false, false, false, false),
    ("CC", "CCK", "166", "Cocos (Keeling) Islands", false, false, false, false),
    ("CO", "COL", "170", "Colombia", true, false, false, false),
    ("KM", "COM", "174", "Comoros", true, false, true, false),
    ("CG", "COG", "178", "Congo", true, false, true, false),
    ("CD", "COD", "180", "Congo, Democratic Republic of the", true, false, false, false),
    ("CK", "COK", "184", "Cook Islands", false, false, false, false),
    ("CR", "CRI", "188", "Costa Rica", true, false, true, false),
    ("CI", "CIV", "384", "Côte d'Ivoire", true, false, true, false),
    ("HR", "HRV", "191", "Croatia", true, false, true, true),
    ("CU", "CUB", "192", "Cuba", true, false, false, false),
    ("CW", "CUW", "531", "Curaçao", false, false, false, false),
    ("CY", "CYP", "196", "Cyprus", true, false, true, true),
    ("CZ", "CZE", "203", "Czechia", true, false, true, true),
    ("DK", "DNK", "208", "Denmark", true, false, true, true),
    ("DJ", "DJI", "262", "Djibouti", true, false, true, false),
    ("DM", "DMA", "212", "Dominica", true, false, false, false),
    ("DO", "DOM", "214", "Dominican Republic", true, false, true, false),
    ("EC", "ECU", "218", "Ecuador", true, false, false, false),
    ("EG", "EGY", "818", "Egypt", true, false, true, false),
    ("SV", "SLV", "222", "El Salvador", true, false, true, false),
    ("GQ", "GNQ", "226", "Equatorial Guinea", true, false, true, false),
    ("ER", "ERI", "232", "Eritrea", true, false, false, false),
    ("EE", "EST", "233", "Estonia", true, false, true, true),
    ("SZ", "SWZ", "748", "Eswatini", true, false, false, false),
    ("ET", "ETH", "231", "Ethiopia", true, false, false, false),
    ("FK", "FLK", "238", "Falkland Islands (Malvinas)", false, false, false, false),
    ("FO", "FRO", "234", "Faroe Islands", false, false, true, false),
    ("FJ", "FJI", "242", "Fiji", true, false, false, false),
    ("FI", "FIN", "246", "Finland", true, false, true, true),
    ("FR", "FRA", "250", "France", true, false, true, true),
    ("GF", "GUF", "254", "French Guiana", false, false, false, false),
    ("PF", "PYF", "258", "French Polynesia", false, false, false, false),
    ("TF", "ATF", "260", "French Southern Territories", false, false, false, false),
    ("GA", "GAB", "266", "Gabon", true, false, true, false),
    ("GM", "GMB", "270", "Gambia", true, false, false, false),
    ("GE", "GEO", "268", "Georgia", true, false, true, false),
    ("DE", "DEU", "276", "Germany", true, false, true, true),
    ("GH", "GHA", "288", "Ghana", true, false, false, false),
    ("GI", "GIB", "292", "Gibraltar", false, false, true, false),
    ("GR", "GRC", "300", "Greece", true, false, true, true),
    ("GL", "GRL", "304", "Greenland", false, false, true, false),
    ("GD", "GRD", "308", "Grenada", true, false, false, false),
    ("GP", "GLP", "312", "Guadeloupe", false, false, false, false),
    ("GU", "GUM", "316", "Guam", false, false, false, false),
    ("GT", "GTM", "320", "Guatemala", true, false, true, false),
    ("GG", "GGY", "831", "Guernsey", false, false, false, false),
    ("GN", "GIN", "324", "Guinea", true, false, false, false),
    ("GW", "GNB", "624", "Guinea-Bissau", true, false, true, false),
    ("GY", "GUY", "328", "Guyana", true, false, false, false),
    ("HT", "HTI", "332", "Haiti", true, false, false, false),
    ("HM", "HMD", "334", "Heard Island and McDonald Islands", false, false, false, false),
    ("VA", "VAT", "336", "Holy See (Vatican City)", true, false, true, true),
    ("HN", "HND", "340", "Honduras", true, false, true, false),
    ("HK", "HKG", "344", "Hong Kong", false, false, false, false),
    ("HU", "HUN", "348", "Hungary", true, false, true, true),
    ("IS", "ISL", "352", "Iceland", true, false, true, true),
    ("IN", "IND", "356", "India", true, false, false, false),
    ("ID", "IDN", "360", "Indonesia", true, false, false, false),
    ("IR", "IRN", "364", "Iran (Islamic Republic of)", true, false, true, false),
    ("IQ", "IRQ", "368", "Iraq", true, false, true, false),
    ("IE", "IRL", "372", "Ireland", true, false, true, true),
    ("IM", "IMN", "833", "Isle of Man", false, false, false, false),
    ("IL", "ISR", "376", "Israel", true, false, true, false),
    ("IT", "ITA", "380", "Italy", true, false, true, true),
    ("JM", "JAM", "388", "Jamaica", true, false, false, false),
    ("JP", "JPN", "392", "Japan", true, false, false, false),
    ("JE", "JEY", "832", "Jersey", false, false, false, false),
    ("JO", "JOR", "400", "Jordan", true, false, true, false),
    ("KZ", "KAZ", "398", "Kazakhstan", true, false, true, false),
    ("KE", "KEN", "404", "Kenya", true, false, false, false),
    ("KI", "KIR", "296", "Kiribati", true, false, false, false),
    ("KP", "PRK", "408", "Korea (Democratic People's Republic of)", true, false, false, false),
    ("KR", "KOR", "410", "Korea, Republic of", true, false, false, false),
    ("KW", "KWT", "414", "Kuwait", true, false, true, false),
    ("KG", "KGZ", "417", "Kyrgyzstan", true, false, false, false),
    ("LA", "LAO", "418", "Lao People's Democratic Republic", true, false, false, false),
    ("LV", "LVA", "428", "Latvia", true, false, true, true),
    ("LB", "LBN", "422", "Lebanon", true, false, true, false),
    ("LS", "LSO", "426", "Lesotho", true, false, false, false),
    ("LR", "LBR", "430", "Liberia", true, false, false, false),
    ("LY", "LBY", "434", "Libya", true, false, true, false),
    ("LI", "LIE", "438", "Liechtenstein", true, false, true, true),
    ("LT", "LTU", "440", "Lithuania", true, false, true, true),
    ("LU", "LUX", "442", "Luxembourg", true, false, true, true),
    ("MO", "MAC", "446", "Macao", false, false, false, false),
    ("MG", "MDG", "450", "Madagascar", true, false, true, false),
    ("MW", "MWI", "454", "Malawi", true, false, false, false),
    ("MY", "MYS", "458", "Malaysia", true, false, false, false),
    ("MV", "MDV", "462", "Maldives", true, false, false, false),
    ("ML", "MLI", "466", "Mali", true, false, true, false),
    ("MT", "MLT", "470", "Malta", true, false, true, true),
    ("MH", "MHL", "584", "Marshall Islands", true, false, false, false),
    ("MQ", "MTQ", "474", "Martinique", false, false, false, false),
    ("MR", "MRT", "478", "Mauritania", true, false, true, false),
    ("MU", "MUS", "480", "Mauritius", true, false, true, false),
    ("YT", "MYT", "175", "Mayotte", false, false, false, false),
    ("MX", "MEX", "484", "Mexico", true, false, false, false),
    ("FM", "FSM", "583", "Micronesia (Federated States of)", true, false, false, false),
    ("MD", "MDA", "498", "Moldova, Republic of", true, false, true, false),
    ("MC", "MCO", "492", "Monaco", true, false, true, true),
    ("MN", "MNG", "496", "Mongolia", true, false, false, false),
    ("ME", "MNE", "499", "Montenegro", true, false, true, false),
    ("MS", "MSR", "500", "Montserrat", false, false, false, false),
    ("MA", "MAR", "504", "Morocco", true, false, true, false),
    ("MZ", "MOZ", "508", "Mozambique", true, false, true, false),
    ("MM", "MMR", "104", "Myanmar", true, false, false, false),
    ("NA", "NAM", "516", "Namibia", true, false, false, false),
    ("NR", "NRU", "520", "Nauru", true, false, false, false),
    ("NP", "NPL", "524", "Nepal", true, false, false, false),
    ("NL", "NLD", "528", "Netherlands", true, false, true, true),
    ("NC", "NCL", "540", "New Caledonia", false, false, false, false),
    ("NZ", "NZL", "554", "New Zealand", true, false, false, false),
    ("NI", "NIC", "558", "Nicaragua", true, false, true, false),
    ("NE", "NER", "562", "Niger", true, false, true, false),
    ("NG", "NGA", "566", "Nigeria", true, false, false, false),
    ("NU", "NIU", "570", "Niue", false, false, false, false),
    ("NF", "NFK", "574", "Norfolk Island", false, false, false, false),
    ("MK", "MKD", "807", "North Macedonia", true, false, true, false),
    ("MP", "MNP", "580", "Northern Mariana Islands", false, false, false, false),
    ("NO", "NOR", "578", "Norway", true, false, true, true),
    ("OM", "OMN", "512", "Oman", true, false, false, false),
    ("PK", "PAK", "586", "Pakistan", true, false, true, false),
    ("PW", "PLW", "585", "Palau", true, false, false, false),
    ("PS", "PSE", "275", "Palestine, State of", false, false, true, false),
    ("PA", "PAN", "591", "Panama", true, false, false, false),
    ("PG", "PNG", "598", "Papua New Guinea", true, false, false, false),
    ("PY", "PRY", "600", "Paraguay", true, false, false, false),
    ("PE", "PER", "604", "Peru", true, false, false, false),
    ("PH", "PHL", "608", "Philippines", true, false, false, false),
    ("PN", "PCN", "612", "Pitcairn", false, false, false, false),
    ("PL", "POL", "616", "Poland", true, false, true, true),
    ("PT", "PRT", "620", "Portugal", true, false, true, true),
    ("PR", "PRI", "630", "Puerto Rico", false, false, false, false),
    ("QA", "QAT", "634", "Qatar", true, false, true, false),
    ("RE", "REU", "638", "Réunion", false, false, false, false),
    ("RO", "ROU", "642", "Romania", true, false, true, true),
    ("RU", "RUS", "643", "Russian Federation", true, false, false, false),
    ("RW", "RWA", "646", "Rwanda", true, false, false, false),
    ("BL", "BLM", "652", "Saint Barthélemy", false, false, false, false),
    ("SH", "SHN", "654", "Saint Helena, Ascension and Tristan da Cunha", false, false, false, false),
    ("KN", "KNA", "659", "Saint Kitts and Nevis", true, false, false, false),
    ("LC", "LCA", "662", "Saint Lucia", true, false, true, false),
    ("MF", "MAF", "663", "Saint Martin (French part)", false, false, false, false),
    ("PM", "SPM", "666", "Saint Pierre and Miquelon", false, false, false, false),
    ("VC", "VCT", "670", "Saint Vincent and the Grenadines", true, false, false, false),
    ("WS", "WSM", "882", "Samoa", true, false, false, false),
    ("SM", "SMR", "674", "San Marino", true, false, true, true),
    ("ST", "STP", "678", "Sao Tome and Principe", true, false, true, false),
    ("SA", "SAU", "682", "Saudi Arabia", true, false, true, false),
    ("SN", "SEN", "686", "Senegal", true, false, true, false),
    ("RS", "SRB", "688", "Serbia", true, false, true, false),
    ("SC", "SYC", "690", "Seychelles", true, false, true, false),
    ("SL", "SLE", "694", "Sierra Leone", true, false, false, false),
    ("SG", "SGP", "702", "Singapore", true, false, false, false),
    ("SX", "SXM", "534", "Sint Maarten (Dutch part)", false, false, false, false),
    ("SK", "SVK", "703", "Slovakia", true, false, true, true),
    ("SI", "SVN", "705", "Slovenia", true, false, true, true),
    ("SB", "SLB", "090", "Solomon Islands", true, false, false, false),
    ("SO", "SOM", "706", "Somalia", true, false, false, false),
    ("ZA", "ZAF", "710", "South Africa", true, false, false, false),
    ("GS", "SGS", "239", "South Georgia and the South Sandwich Islands", false, false, false, false),
    ("SS", "SSD", "728", "South Sudan", true, false, false, false),
    ("ES", "ESP", "724", "Spain", true, false, true, true),
    ("LK", "LKA", "144", "Sri Lanka", true, false, false, false),
    ("SD", "SDN", "729", "Sudan", true, false, true, false),
    ("SR", "SUR", "740", "Suriname", true, false, false, false),
    ("SJ", "SJM", "744", "Svalbard and Jan Mayen", false, false, false, false),
    ("SE", "SWE", "752", "Sweden", true, false, true, true),
    ("CH", "CHE", "756", "Switzerland", true, false, true, true),
    ("SY", "SYR", "760", "Syrian Arab Republic", true, false, false, false),
    ("TW", "TWN", "158", "Taiwan, Province of China", false, false, false, false),
    ("TJ", "TJK", "762", "Tajikistan", true, false, false, false),
    ("TZ", "TZA", "834", "Tanzania, United Republic of", true, false, false, false),
    ("TH", "THA", "764", "Thailand", true, false, true, false),
    ("TL", "TLS", "626", "Timor-Leste", true, false, true, false),
    ("TG", "TGO", "768", "Togo", true, false, true, false),
    ("TK", "TKL", "772", "Tokelau", false, false, false, false),
    ("TO", "TON", "776", "Tonga", true, false, false, false),
    ("TT", "TTO", "780", "Trinidad and Tobago", true, false, false, false),
    ("TN", "TUN", "788", "Tunisia", true, false, true, false),
    ("TR", "TUR", "792", "Turkey", true, false, true, false),
    ("TM", "TKM", "795", "Turkmenistan", true, false, false, false),
    ("TC", "TCA", "796", "Turks and Caicos Islands", false, false, false, false),
    ("TV", "TUV", "798", "Tuvalu", true, false, false, false),
    ("UG", "UGA", "800", "Uganda", true, false, false, false),
    ("UA", "UKR", "804", "Ukraine", true, false, true, false),
    ("AE", "ARE", "784", "United Arab Emirates", true, false, true, false),
    ("GB", "GBR", "826", "United Kingdom of Great Britain and Northern Ireland", true, false, true, true),
    ("US", "USA", "840", "United States of America", true, false, false, false),
    ("UM", "UMI", "581", "United States Minor Outlying Islands", false, false, false, false),
    ("UY", "URY", "858", "Uruguay", true, false, false, false),
    ("UZ", "UZB", "860", "Uzbekistan", true, false, false, false),
    ("VU", "VUT", "548", "Vanuatu", true, false, false, false),
    ("VE", "VEN", "862", "Venezuela (Bolivarian Republic of)", true, false, false, false),
    ("VN", "VNM", "704", "Viet Nam", true, false, false, false),
    ("VG", "VGB", "092", "Virgin Islands (British)", false, false, true, false),
    ("VI", "VIR", "850", "Virgin Islands (U.S.)", false, false, false, false),
    ("WF", "WLF", "876", "Wallis and Futuna", false, false, false, false),
    ("EH", "ESH", "732", "Western Sahara", false, false, false, false),
    ("YE", "YEM", "887", "Yemen", true, false, false, false),
    ("ZM", "ZMB", "894", "Zambia", true, false, false, false),
    ("ZW", "ZWE", "716", "Zimbabwe", true, false, false, false),
    ("XK", "...", "...", "Kosovo", true, true, true, false),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let countries = CountryRegistry::builtin();
        assert!(countries.is_country("de"));
        assert!(countries.is_country("De"));
        assert_eq!(countries.get("hu").unwrap().name, "Hungary");
    }

    #[test]
    fn participation_flags() {
        let countries = CountryRegistry::builtin();
        assert!(countries.is_iban_country("HU"));
        assert!(countries.is_sepa_country("DE"));
        // Kazakhstan uses IBAN but is not SEPA
        assert!(countries.is_iban_country("KZ"));
        assert!(!countries.is_sepa_country("KZ"));
        // the US neither
        assert!(!countries.is_iban_country("US"));
        assert!(!countries.is_country("XZ"));
    }

    #[test]
    fn kosovo_is_non_iso() {
        let countries = CountryRegistry::builtin();
        let xk = countries.get("XK").unwrap();
        assert!(xk.non_iso);
        assert!(xk.uses_iban);
    }
}
