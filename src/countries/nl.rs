use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex = Regex::new("^.*([A-Z]{4}[0-9]{10}).*$").unwrap();
}

/// Netherlands: the classic elfproef over the ten account digits. ING
/// accounts (the former Postbank girorekening) are exempt.
pub(crate) struct NlHandler {
    ctx: HandlerContext,
}

impl NlHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for NlHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        if &bban[0..4] == "INGB" {
            return Ok(true);
        }

        let sum: u32 = (0..10)
            .map(|i| digit_at(bban, i + 4) * (10 - i as u32))
            .sum();

        Ok(sum % 11 == 0)
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

        format!(
            "{} {} {} {}",
            &bban[0..4],
            &bban[4..6],
            &bban[6..8],
            &bban[8..]
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn elfproef() {
        let handler = handler_for("NL", vec![]);
        assert_eq!(handler.is_valid_checksum("RABO0300065264"), Ok(true));
        assert_eq!(handler.is_valid_checksum("RABO0300065265"), Ok(false));
    }

    #[test]
    fn ing_accounts_are_exempt() {
        let handler = handler_for("NL", vec![]);
        // would fail the elfproef for any other bank
        assert_eq!(handler.is_valid_checksum("INGB0001234567"), Ok(true));
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("NL", vec![]);
        assert_eq!(
            handler.preformat("RABO 0300 0652 64").as_deref(),
            Some("RABO0300065264")
        );
        assert_eq!(handler.format("RABO0300065264"), "RABO 03 00 065264");
    }
}
