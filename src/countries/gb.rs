use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{14}).*$").unwrap();
    static ref FORMATTED: Regex =
        Regex::new("^[^0-9]*([0-9]{2})-([0-9]{2})-([0-9]{2})([0-9]{7,8}).*$").unwrap();
}

/// United Kingdom: sort code plus account number. The published
/// modulus checks are per-institution and not implemented here.
pub(crate) struct GbHandler {
    ctx: HandlerContext,
}

impl GbHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for GbHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            return Some(format!("{}{}{}{}", &caps[1], &caps[2], &caps[3], &caps[4]));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() < 6 {
            return bban.to_string();
        }

        format!(
            "{}-{}-{}-{}",
            &bban[0..2],
            &bban[2..4],
            &bban[4..6],
            &bban[6..]
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn sort_code_forms() {
        let handler = handler_for("GB", vec![]);
        assert_eq!(
            handler.preformat("60-16-13 31926819").as_deref(),
            Some("60161331926819")
        );
        assert_eq!(
            handler.preformat("60161331926819").as_deref(),
            Some("60161331926819")
        );
        assert_eq!(handler.preformat("60-16-13"), None);
    }

    #[test]
    fn format_restores_sort_code() {
        let handler = handler_for("GB", vec![]);
        assert_eq!(handler.format("60161331926819"), "60-16-13-31926819");
    }
}
