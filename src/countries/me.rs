use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{18}).*$").unwrap();
}

/// Montenegro: ISO 7064 mod-97-10 over the whole BBAN.
pub(crate) struct MeHandler {
    ctx: HandlerContext,
}

impl MeHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for MeHandler {
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

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{} {} {}", &bban[0..3], &bban[3..16], &bban[16..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn mod97_rule() {
        let handler = handler_for("ME", vec![]);
        assert_eq!(handler.is_valid_checksum("505000012345678951"), Ok(true));
        assert_eq!(handler.is_valid_checksum("505000012345678915"), Ok(false));
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("ME", vec![]);
        assert_eq!(
            handler.preformat("505 0000123456789 51").as_deref(),
            Some("505000012345678951")
        );
        assert_eq!(
            handler.format("505000012345678951"),
            "505 0000123456789 51"
        );
    }
}
