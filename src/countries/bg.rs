use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex =
        Regex::new("^.*([0-9A-Z]{4}[0-9]{4}[0-9]{2}[0-9A-Z]{8}).*$").unwrap();
}

/// Bulgaria: the official account numbering rules define no national
/// check digit, so only the shape is policed here.
pub(crate) struct BgHandler {
    ctx: HandlerContext,
}

impl BgHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for BgHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        ALPHANUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        let mut result = String::with_capacity(bban.len() + bban.len() / 4);

        for (p, c) in bban.chars().enumerate() {
            if p > 0 && p % 4 == 0 {
                result.push(' ');
            }
            result.push(c);
        }

        result
    }
}
