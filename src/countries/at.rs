use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{16}).*$").unwrap();
    static ref FORMATTED: Regex = Regex::new("^[^0-9]*([0-9]{5})-([0-9]{1,11})[^0-9]*$").unwrap();
}

/// Austria: 5-digit Bankleitzahl + 11-digit account, no published
/// national check-digit algorithm.
pub(crate) struct AtHandler {
    ctx: HandlerContext,
}

impl AtHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for AtHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        // algorithm (if any) unknown
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            let bank = &caps[1];
            let account = &caps[2];
            return Some(format!("{}{:0>11}", bank, account));
        }

        if let Some(caps) = NUMERIC.captures(&trimmed) {
            return Some(caps[1].to_string());
        }

        None
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}-{}", &bban[0..5], &bban[5..])
    }
}
