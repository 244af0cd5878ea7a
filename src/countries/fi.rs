use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{14}).*$").unwrap();
    static ref FORMATTED: Regex = Regex::new("^[^0-9]*([0-9]{6})-([0-9]{2,8}).*$").unwrap();
}

/// Finland: Luhn-style 2-1 weighted check over thirteen digits. The short
/// national form `bank-account` zero-fills differently depending on the
/// bank group the leading digit selects.
pub(crate) struct FiHandler {
    ctx: HandlerContext,
}

impl FiHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }

    /// Bank group of a leading digit: group 2 institutions keep the first
    /// account digit in place and zero-fill after it.
    fn bank_group(first: u8) -> Option<u32> {
        match first {
            b'1' | b'2' | b'3' | b'6' | b'8' => Some(1),
            b'4' | b'5' => Some(2),
            _ => None,
        }
    }
}

impl BbanHandler for FiHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let mut sum = 0u32;
        for (i, b) in bban.bytes().rev().skip(1).take(13).enumerate() {
            let value = (b - b'0') as u32 * [2, 1][i % 2];
            sum += value % 10;
            if value > 9 {
                sum += 1;
            }
        }

        let check = (10 - sum % 10) % 10;
        Ok(bban.as_bytes().last().map(|b| (b - b'0') as u32) == Some(check))
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        let group = Self::bank_group(*trimmed.as_bytes().first()?)?;

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            let bank = &caps[1];
            let account = &caps[2];

            let account = if account.len() < 8 {
                match group {
                    1 => format!("{:0>8}", account),
                    _ => format!("{}{:0>7}", &account[0..1], &account[1..]),
                }
            } else {
                account.to_string()
            };

            return Some(format!("{}{}", bank, account));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}-{}", &bban[0..6], &bban[6..])
    }
}
