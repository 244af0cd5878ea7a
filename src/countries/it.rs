use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex =
        Regex::new("^.*([A-Z][0-9]{5}[0-9]{5}[0-9A-Z]{12}).*$").unwrap();
}

// value of an odd-position (1st, 3rd, ...) character in the CIN sum
const ODD_VALUES: [u32; 26] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, 2, 4, 18, 20, 11, 3, 6, 8, 12, 14, 16, 10, 22, 25, 24, 23,
];

/// Italy: the leading CIN letter checks the ABI, CAB and account that
/// follow it.
pub(crate) struct ItHandler {
    ctx: HandlerContext,
}

impl ItHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for ItHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let cin = bban.as_bytes()[0];

        let mut sum = 0u32;
        for (i, b) in bban.bytes().skip(1).enumerate() {
            let value = match b {
                b'0'..=b'9' => (b - b'0') as u32,
                b'A'..=b'Z' => (b - b'A') as u32,
                _ => return Ok(false),
            };

            sum += if i % 2 == 1 {
                value
            } else {
                ODD_VALUES[value as usize]
            };
        }

        let computed = b'A' + (sum % 26) as u8;
        Ok(cin == computed)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        ALPHANUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let cin = &bban[0..1];
        let bank = &bban[1..6]; // ABI
        let branch = &bban[6..11]; // CAB
        let account = &bban[11..];

        format!("{} {} {} {}", cin, bank, branch, account)
    }
}
