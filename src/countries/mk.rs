use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex =
        Regex::new("^.*([0-9]{3}[0-9A-Z]{10}[0-9]{2}).*$").unwrap();
}

/// North Macedonia: ISO 7064 mod-97-10 over the whole BBAN.
pub(crate) struct MkHandler {
    ctx: HandlerContext,
}

impl MkHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for MkHandler {
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

        ALPHANUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{} {} {}", &bban[0..3], &bban[3..13], &bban[13..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn mod97_rule() {
        let handler = handler_for("MK", vec![]);
        assert_eq!(handler.is_valid_checksum("250120000058984"), Ok(true));
        assert_eq!(handler.is_valid_checksum("250120000058948"), Ok(false));
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("MK", vec![]);
        assert_eq!(
            handler.preformat("250 1200000589 84").as_deref(),
            Some("250120000058984")
        );
        assert_eq!(handler.format("250120000058984"), "250 1200000589 84");
    }
}
