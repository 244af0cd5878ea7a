use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{15}).*$").unwrap();
    static ref FORMATTED: Regex =
        Regex::new("^[^0-9]*([0-9]{5})-([0-9]{8})([0-9]{2}).*$").unwrap();
}

/// Slovenia: ISO 7064 mod-97-10 over the whole BBAN.
pub(crate) struct SiHandler {
    ctx: HandlerContext,
}

impl SiHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for SiHandler {
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
            return Some(format!("{}{}{}", &caps[1], &caps[2], &caps[3]));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}-{}", &bban[0..5], &bban[5..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn mod97_rule() {
        let handler = handler_for("SI", vec![]);
        assert_eq!(handler.is_valid_checksum("263300012039086"), Ok(true));
        assert_eq!(handler.is_valid_checksum("263300012039068"), Ok(false));
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("SI", vec![]);
        assert_eq!(
            handler.preformat("26330-0012039086").as_deref(),
            Some("263300012039086")
        );
        assert_eq!(handler.format("263300012039086"), "26330-0012039086");
    }

    #[test]
    fn full_pipeline() {
        let handler = handler_for("SI", vec![]);
        assert_eq!(handler.is_valid("263300012039086"), Ok(true));
    }
}
