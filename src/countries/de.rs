use ahash::AHashMap;
use lazy_static::lazy_static;
use metrics::counter;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::{
    check_digit_matches, digit_at, m10h_checksum, weighted_sum_ltr, weighted_sum_rtl,
};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{18}).*$").unwrap();
    static ref WITH_HYPHEN: Regex = Regex::new("^.*([0-9]{8})-([0-9]{1,10}).*$").unwrap();
    static ref WITH_BLZ: Regex = Regex::new("^.*([0-9]{1,10})BLZ([0-9]{8}).*$").unwrap();
    static ref ALGORITHMS: AHashMap<&'static str, Algorithm> = algorithm_table();
}

/// One plain right-to-left weighted-sum scheme: weights cycle over
/// `account[first..=last]`, the computed digit is compared at
/// `check_pos`.
struct Method {
    weights: &'static [u32],
    modulus: u32,
    first: usize,
    last: usize,
    check_pos: usize,
}

const fn method(
    weights: &'static [u32],
    modulus: u32,
    first: usize,
    last: usize,
    check_pos: usize,
) -> Algorithm {
    Algorithm::Weighted(Method {
        weights,
        modulus,
        first,
        last,
        check_pos,
    })
}

/// A Bundesbank check-digit method. Most reduce to a single weighted-sum
/// descriptor; the guarded and disjunctive ones carry their own function.
enum Algorithm {
    Weighted(Method),
    Custom(fn(&str) -> bool),
    /// Defined as "no checksum", or a documented id with no published
    /// arithmetic: dispatchable, cannot disprove.
    NoCheck,
}

impl Algorithm {
    fn run(&self, account: &str) -> bool {
        match self {
            Algorithm::Weighted(m) => check_digit_matches(
                account,
                weighted_sum_rtl(account, m.weights, m.modulus, m.first, m.last),
                m.check_pos,
            ),
            Algorithm::Custom(f) => f(account),
            Algorithm::NoCheck => true,
        }
    }
}

fn algo_11(account: &str) -> bool {
    let mut check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7, 8, 9, 10], 11, 0, 8);
    if check == 0 {
        check = 9;
    }
    check_digit_matches(account, check, 9)
}

fn algo_16(account: &str) -> bool {
    let check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7], 11, 0, 8);
    if check == 10 {
        return digit_at(account, 8) == digit_at(account, 9);
    }
    check_digit_matches(account, check, 9)
}

fn algo_17(account: &str) -> bool {
    const WEIGHTS: [u32; 6] = [1, 2, 1, 2, 1, 2];
    const MASTER: [bool; 6] = [false, true, false, true, false, true];
    let check = weighted_sum_ltr(account, &WEIGHTS, &MASTER, 11, false, 1, 6, -1);
    check_digit_matches(account, check, 7)
}

fn algo_21(account: &str) -> bool {
    let check = weighted_sum_ltr(account, &[2, 1], &[true, true], 10, true, 0, 8, 0);
    check_digit_matches(account, check, 9)
}

fn algo_23(account: &str) -> bool {
    let check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7], 11, 0, 5);
    if check == 10 {
        return digit_at(account, 8) == digit_at(account, 9);
    }
    check_digit_matches(account, check, 6)
}

fn algo_24(account: &str) -> bool {
    const WEIGHTS: [u32; 3] = [1, 2, 3];

    let begin = match account.as_bytes()[0] {
        b'3'..=b'6' => 1,
        b'9' => 3,
        _ => 0,
    };

    let short_account = account[begin..9].trim_start_matches('0');

    let mut sum = 0u32;
    for (i, b) in short_account.bytes().enumerate() {
        let digit = (b - b'0') as u32;
        sum += ((digit + 1) * WEIGHTS[i % 3]) % 11;
    }

    check_digit_matches(account, sum % 10, 9)
}

fn algo_25(account: &str) -> bool {
    let check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7, 8, 9, 0], 11, 0, 8);
    if check == 10 {
        let work_flag = digit_at(account, 1);
        return digit_at(account, 9) == 0 && (work_flag == 8 || work_flag == 9);
    }
    check_digit_matches(account, check, 9)
}

fn algo_26(account: &str) -> bool {
    let shifted = if account.starts_with('0') || account.as_bytes()[1] == b'0' {
        format!("{}00", &account[2..])
    } else {
        account.to_string()
    };

    let check = weighted_sum_rtl(&shifted, &[2, 3, 4, 5, 6, 7], 11, 0, 6);
    check_digit_matches(account, check, 7)
}

fn algo_27(account: &str) -> bool {
    let check = if account.starts_with('0') {
        weighted_sum_rtl(account, &[2, 1], 10, 0, 8)
    } else {
        m10h_checksum(account)
    };
    check_digit_matches(account, check, 9)
}

fn algo_28(account: &str) -> bool {
    let mut check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7, 8], 11, 0, 6);
    if check == 10 {
        check = 0;
    }
    check_digit_matches(account, check, 7)
}

fn algo_29(account: &str) -> bool {
    check_digit_matches(account, m10h_checksum(account), 9)
}

fn algo_31(account: &str) -> bool {
    let mut check = weighted_sum_rtl(account, &[9, 8, 7, 6, 5, 4, 3, 2, 1], 11, 0, 8);
    if check == 10 {
        check = 0;
    }
    check_digit_matches(account, check, 9)
}

fn algo_34(account: &str) -> bool {
    let mut check = weighted_sum_rtl(account, &[2, 4, 8, 5, 10, 9, 7], 11, 0, 6);
    if check == 10 {
        check = 0;
    }
    check_digit_matches(account, check, 7)
}

fn algo_35(account: &str) -> bool {
    let check = weighted_sum_rtl(account, &[2, 3, 4, 5, 6, 7, 8, 9, 10], 11, 0, 8);
    if check == 10 {
        let flag = digit_at(account, 1);
        return flag == 8 || flag == 9;
    }
    check_digit_matches(account, check, 7)
}

// method 00 derivative: modulus 10, with the head excluded after a 9 in
// the fourth position
fn algo_41(account: &str) -> bool {
    let first = if account.as_bytes()[3] != b'9' { 0 } else { 3 };
    let check = weighted_sum_rtl(account, &[2, 1], 10, first, 8);
    check_digit_matches(account, check, 9)
}

fn algo_45(account: &str) -> bool {
    let bytes = account.as_bytes();
    if bytes[0] == b'0' || bytes[4] == b'1' || (bytes[0] == b'4' && bytes[1] == b'8') {
        return true;
    }

    let check = weighted_sum_rtl(account, &[2, 1], 10, 0, 8);
    check_digit_matches(account, check, 9)
}

fn algo_49(account: &str) -> bool {
    let check_00 = weighted_sum_rtl(account, &[2, 1], 10, 0, 8);
    let check_01 = weighted_sum_rtl(account, &[3, 7, 1], 10, 0, 8);
    check_digit_matches(account, check_00, 9) || check_digit_matches(account, check_01, 9)
}

// the fallback re-runs the sum over the account with the sub-account
// digits zeroed out
fn algo_50(account: &str) -> bool {
    const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];

    let check = weighted_sum_rtl(account, &WEIGHTS, 11, 0, 5);
    if check_digit_matches(account, check, 6) {
        return true;
    }

    let imaginary = format!("{}000", &account[3..7]);
    let check = weighted_sum_rtl(&imaginary, &WEIGHTS, 11, 0, 5);
    check_digit_matches(&imaginary, check, 6)
}

// ids that are documented but have no published arithmetic; they stay
// dispatchable and cannot disprove an account
#[rustfmt::skip]
const PLACEHOLDER_IDS: &[&str] = &[
    "51", "56", "57", "59", "60", "61", "63", "64", "65", "66", "67", "68",
    "71", "73", "74", "76", "78", "81", "85", "87", "88", "91", "92", "94",
    "95", "96", "98", "99",
    "A2", "A3", "A4", "A5", "A6", "A7", "A8",
    "B1", "B2", "B3", "B5", "B6", "B7", "B8",
    "C0", "C1", "C2", "C3", "C5", "C7", "C8", "C9",
    "D0", "D2", "D6", "D7", "D8", "D9",
    "E0", "E3", "E4",
];

#[rustfmt::skip]
fn algorithm_table() -> AHashMap<&'static str, Algorithm> {
    let mut table = AHashMap::new();

    table.insert("00", method(&[2, 1], 10, 0, 8, 9));
    table.insert("01", method(&[3, 7, 1], 10, 0, 8, 9));
    table.insert("02", method(&[2, 3, 4, 5, 6, 7, 8, 9], 11, 0, 8, 9));
    table.insert("03", method(&[2, 1], 10, 0, 8, 9));
    table.insert("04", method(&[2, 3, 4, 5, 6, 7], 11, 0, 8, 9));
    table.insert("05", method(&[7, 3, 1], 10, 0, 8, 9));
    table.insert("06", method(&[2, 3, 4, 5, 6, 7], 11, 0, 8, 9));
    table.insert("07", method(&[2, 3, 4, 5, 6, 7, 8, 9, 10], 11, 0, 8, 9));
    table.insert("08", method(&[2, 1], 10, 0, 8, 9)); // TODO: accounts below 60000 carry no check digit
    table.insert("09", Algorithm::NoCheck);
    table.insert("10", method(&[2, 3, 4, 5, 6, 7, 8, 9, 10], 11, 0, 8, 9));
    table.insert("11", Algorithm::Custom(algo_11));
    table.insert("12", Algorithm::NoCheck); // never assigned
    table.insert("13", method(&[2, 1], 10, 1, 6, 7));
    table.insert("14", method(&[2, 3, 4, 5, 6, 7], 11, 3, 8, 9));
    table.insert("15", method(&[2, 3, 4, 5], 11, 5, 8, 9));
    table.insert("16", Algorithm::Custom(algo_16));
    table.insert("17", Algorithm::Custom(algo_17));
    table.insert("18", method(&[3, 9, 7, 1], 10, 0, 8, 9));
    table.insert("19", method(&[2, 3, 4, 5, 6, 7, 8, 9, 1], 11, 0, 8, 9));
    table.insert("20", method(&[2, 3, 4, 5, 6, 7, 8, 9, 3], 11, 0, 8, 9));
    table.insert("21", Algorithm::Custom(algo_21));
    table.insert("22", method(&[3, 1], 10, 0, 8, 9));
    table.insert("23", Algorithm::Custom(algo_23));
    table.insert("24", Algorithm::Custom(algo_24));
    table.insert("25", Algorithm::Custom(algo_25));
    table.insert("26", Algorithm::Custom(algo_26));
    table.insert("27", Algorithm::Custom(algo_27));
    table.insert("28", Algorithm::Custom(algo_28));
    table.insert("29", Algorithm::Custom(algo_29));
    table.insert("30", method(&[2, 1, 2, 1, 0, 0, 0, 0, 2], 10, 0, 8, 9));
    table.insert("31", Algorithm::Custom(algo_31));
    table.insert("32", method(&[2, 3, 4, 5, 6, 7], 11, 3, 8, 9));
    table.insert("33", method(&[2, 3, 4, 5, 6], 11, 4, 8, 9));
    table.insert("34", Algorithm::Custom(algo_34));
    table.insert("35", Algorithm::Custom(algo_35));
    table.insert("36", method(&[2, 4, 8, 5], 11, 5, 8, 9));
    table.insert("37", method(&[2, 4, 8, 5, 10], 11, 4, 8, 9));
    table.insert("38", method(&[2, 4, 8, 5, 10, 9], 11, 3, 8, 9));
    table.insert("39", method(&[2, 4, 8, 5, 10, 9, 7], 11, 2, 8, 9));
    table.insert("40", method(&[2, 4, 8, 5, 10, 9, 7, 3, 6], 11, 0, 8, 9));
    table.insert("41", Algorithm::Custom(algo_41));
    table.insert("42", method(&[2, 3, 4, 5, 6, 7, 8, 9], 11, 1, 8, 9));
    table.insert("43", method(&[1, 2, 3, 4, 5, 6, 7, 8, 9], 10, 0, 8, 9));
    table.insert("44", method(&[2, 4, 8, 5, 10], 11, 4, 8, 9));
    table.insert("45", Algorithm::Custom(algo_45));
    table.insert("46", method(&[2, 3, 4, 5, 6], 11, 2, 6, 7));
    table.insert("47", method(&[2, 3, 4, 5, 6], 11, 3, 7, 8));
    table.insert("48", method(&[2, 3, 4, 5, 6, 7], 11, 2, 7, 8));
    table.insert("49", Algorithm::Custom(algo_49));
    table.insert("50", Algorithm::Custom(algo_50));

    for id in PLACEHOLDER_IDS {
        table.insert(*id, Algorithm::NoCheck);
    }

    table
}

/// Germany: the checksum rule is bank-specific. The Bankleitzahl selects
/// the registry entry, the entry's algorithm id selects the method, and
/// the method runs over the 10-digit account number.
pub(crate) struct DeHandler {
    ctx: HandlerContext,
}

impl DeHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for DeHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let (lo, hi) = self.ctx.structure.bank_code;
        let bank_code = &bban[lo..hi];

        let entries = self.ctx.banks.entries_for(&self.ctx.country, bank_code);
        let Some(entry) = entries.first() else {
            // bank unknown, cannot determine the checksum algorithm
            counter!("iban.de.bank_unknown").increment(1);
            return Ok(false);
        };

        let id = entry.checksum_algo.clone().unwrap_or_default();
        let Some(algorithm) = ALGORITHMS.get(id.as_str()) else {
            counter!("iban.de.algorithm_unknown").increment(1);
            return Err(IbanError::UnknownChecksumAlgorithm {
                country: self.ctx.country.clone(),
                id,
            });
        };

        Ok(algorithm.run(&bban[8..18]))
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        // 532013000 BLZ 37040044
        if let Some(caps) = WITH_BLZ.captures(&trimmed) {
            let account = &caps[1];
            let blz = &caps[2];
            return Some(format!("{}{:0>10}", blz, account));
        }

        // 37040044-532013000
        if let Some(caps) = WITH_HYPHEN.captures(&trimmed) {
            let blz = &caps[1];
            let account = &caps[2];
            return Some(format!("{}{:0>10}", blz, account));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let blz = &bban[0..8];
        let account = bban[8..].trim_start_matches('0');

        format!("{} BLZ {}", account, blz)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bban::BbanHandler;
    use crate::bic::BankEntry;
    use crate::countries::testutil::handler_for;
    use crate::error::IbanError;

    fn bank(blz: &str, algo: Option<&str>) -> BankEntry {
        BankEntry {
            country_code: "DE".to_string(),
            bank_code: blz.to_string(),
            name: "Testbank".to_string(),
            short_name: "Testbank".to_string(),
            bic: "TESTDEFFXXX".to_string(),
            primary: true,
            checksum_algo: algo.map(str::to_string),
        }
    }

    #[test]
    fn algorithm_00_double_and_fold() {
        let algo = ALGORITHMS.get("00").unwrap();
        assert!(algo.run("9290701006"));
        assert!(!algo.run("9290701001"));
    }

    #[test]
    fn algorithm_01_weights_371() {
        let algo = ALGORITHMS.get("01").unwrap();
        assert!(algo.run("1234567899"));
        assert!(!algo.run("1234567891"));
    }

    #[test]
    fn algorithm_02_weighted_mod_11() {
        let algo = ALGORITHMS.get("02").unwrap();
        assert!(algo.run("1234567897"));
        assert!(!algo.run("1234567896"));
    }

    #[test]
    fn algorithm_06_weighted_mod_11() {
        let algo = ALGORITHMS.get("06").unwrap();
        assert!(algo.run("1234567884"));
        assert!(!algo.run("1234567885"));
    }

    #[test]
    fn algorithm_09_is_no_check() {
        let algo = ALGORITHMS.get("09").unwrap();
        assert!(algo.run("0000000000"));
        assert!(algo.run("9999999999"));
    }

    #[test]
    fn algorithm_10_matches_07() {
        let algo = ALGORITHMS.get("10").unwrap();
        assert!(algo.run("0830166130"));
        assert!(!algo.run("0830166131"));
    }

    #[test]
    fn algorithm_13_checks_digit_seven() {
        let algo = ALGORITHMS.get("13").unwrap();
        // the trailing two digits are a sub-account outside the sum
        assert!(algo.run("1234567800"));
        assert!(algo.run("1234567899"));
        assert!(!algo.run("1234567900"));
    }

    #[test]
    fn algorithm_16_equal_digit_fallback() {
        // a weighted remainder of 1 means an unusable check digit; the
        // rule then demands equal digits at positions 9 and 10
        let algo = ALGORITHMS.get("16").unwrap();
        assert!(algo.run("0094012355"));
        assert!(!algo.run("0094012350"));
    }

    #[test]
    fn algorithm_17_master_number_folding() {
        let algo = ALGORITHMS.get("17").unwrap();
        assert!(algo.run("0446786300"));
        assert!(!algo.run("0446786400"));
    }

    #[test]
    fn algorithm_21_folds_the_sum_once() {
        let algo = ALGORITHMS.get("21").unwrap();
        assert!(algo.run("1234567893"));
        assert!(!algo.run("1234567894"));
    }

    #[test]
    fn algorithm_24_guarded_prefixes() {
        let algo = ALGORITHMS.get("24").unwrap();
        assert!(algo.run("1234567857"));
        // a leading 9 drops the first three digits from the sum
        assert!(algo.run("9994567845"));
    }

    #[test]
    fn algorithm_25_work_account_fallback() {
        let algo = ALGORITHMS.get("25").unwrap();
        assert!(algo.run("1234567899"));
        // unusable check digit: only work accounts of type 8 or 9 with a
        // zero in the check position survive
        assert!(algo.run("1979666970"));
        assert!(!algo.run("1079666970"));
    }

    #[test]
    fn algorithm_26_shifts_zero_prefixed_accounts() {
        let algo = ALGORITHMS.get("26").unwrap();
        assert!(algo.run("1234567490"));
        assert!(algo.run("0034567990"));
    }

    #[test]
    fn algorithm_27_switches_on_leading_digit() {
        let algo = ALGORITHMS.get("27").unwrap();
        // a leading zero runs the plain 2-1 scheme
        assert!(algo.run("0290701004"));
        // anything else runs the substitution-table check
        assert!(algo.run("7030824622"));
    }

    #[test]
    fn algorithm_28_collapses_ten_to_zero() {
        let algo = ALGORITHMS.get("28").unwrap();
        assert!(algo.run("1234567955"));
        assert!(!algo.run("1234567855"));
    }

    #[test]
    fn algorithm_29_substitution_table() {
        let algo = ALGORITHMS.get("29").unwrap();
        assert!(algo.run("1860913905"));
        assert!(!algo.run("1860913906"));
    }

    #[test]
    fn algorithm_31_descending_weights() {
        let algo = ALGORITHMS.get("31").unwrap();
        assert!(algo.run("1234567891"));
        assert!(!algo.run("1234567892"));
    }

    #[test]
    fn algorithm_41_skips_the_head_after_a_nine() {
        let algo = ALGORITHMS.get("41").unwrap();
        assert!(algo.run("1234567890"));
        // digit 4 equal to 9 restricts the sum to the tail
        assert!(algo.run("1239567895"));
        assert!(!algo.run("1239567890"));
    }

    #[test]
    fn algorithm_45_exception_ranges_pass() {
        let algo = ALGORITHMS.get("45").unwrap();
        // a leading zero is a documented exception range
        assert!(algo.run("0123456789"));
        // digit 5 equal to 1 likewise
        assert!(algo.run("9999199999"));
        // otherwise the 2-1 scheme applies
        assert!(algo.run("9290701006"));
        assert!(!algo.run("9290701001"));
    }

    #[test]
    fn algorithm_49_is_a_disjunction() {
        let algo = ALGORITHMS.get("49").unwrap();
        // passes method 00
        assert!(algo.run("9290701006"));
        // passes method 01 only
        assert!(algo.run("1234567899"));
        assert!(!algo.run("1234567891"));
    }

    #[test]
    fn algorithm_50_sub_account_fallback() {
        let algo = ALGORITHMS.get("50").unwrap();
        assert!(algo.run("1234560000"));
        // the main form fails, the zeroed sub-account form passes
        assert!(algo.run("0004560000"));
    }

    #[test]
    fn placeholder_ids_cannot_disprove() {
        for id in ["51", "99", "A2", "E4"] {
            assert!(ALGORITHMS.get(id).unwrap().run("1234567890"), "{}", id);
        }
    }

    #[test]
    fn dispatch_by_bank_entry() {
        let handler = handler_for("DE", vec![bank("43060967", Some("09"))]);
        // id 09 is defined as "no checksum"
        assert_eq!(
            handler.is_valid_checksum("430609671234567890"),
            Ok(true)
        );
    }

    #[test]
    fn unknown_bank_fails_softly() {
        let handler = handler_for("DE", vec![bank("43060967", Some("09"))]);
        assert_eq!(
            handler.is_valid_checksum("999999991234567890"),
            Ok(false)
        );
    }

    #[test]
    fn unregistered_algorithm_id_is_fatal() {
        let handler = handler_for("DE", vec![bank("43060967", Some("ZZ"))]);
        assert_eq!(
            handler.is_valid_checksum("430609671234567890"),
            Err(IbanError::UnknownChecksumAlgorithm {
                country: "DE".to_string(),
                id: "ZZ".to_string(),
            })
        );
    }

    #[test]
    fn preformat_accepts_blz_notations() {
        let handler = handler_for("DE", vec![]);
        assert_eq!(
            handler.preformat("37040044-532013000").as_deref(),
            Some("370400440532013000")
        );
        assert_eq!(
            handler.preformat("370400440532013000").as_deref(),
            Some("370400440532013000")
        );
        assert_eq!(handler.preformat("37040044"), None);
    }

    #[test]
    fn format_is_the_blz_notation() {
        let handler = handler_for("DE", vec![]);
        assert_eq!(
            handler.format("370400440532013000"),
            "532013000 BLZ 37040044"
        );
    }
}
