use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{18}).*$").unwrap();
    static ref FORMATTED: Regex =
        Regex::new("^[^0-9]*([0-9]{3})-([0-9]{1,13})-([0-9]{2}).*$").unwrap();
}

/// Serbia: ISO 7064 mod-97-10 over the whole BBAN; the local presentation
/// drops leading zeros of the account part.
pub(crate) struct RsHandler {
    ctx: HandlerContext,
}

impl RsHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for RsHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        Ok(checksum::mod97_check_value(bban) == Some(97))
    }

    fn is_valid_bankcode(&self, _bban: &str) -> bool {
        true
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            return Some(format!("{}{:0>13}{}", &caps[1], &caps[2], &caps[3]));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}-{}-{}", &bban[0..3], &bban[3..16], &bban[16..])
    }
}
