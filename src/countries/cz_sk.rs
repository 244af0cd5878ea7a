use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{20}).*$").unwrap();
    static ref FORMATTED: Regex =
        Regex::new("^[^0-9]*([0-9]{1,6})-([0-9]{10})/([0-9]{4}).*$").unwrap();
}

const MULTIPLIERS: [u32; 10] = [6, 3, 7, 9, 10, 5, 8, 4, 2, 1];

/// Czechia and Slovakia share the former federal account scheme: a
/// 10-digit account whose weighted sum must vanish modulo 11, written
/// locally as `prefix-account/bank`.
pub(crate) struct CzSkHandler {
    ctx: HandlerContext,
}

impl CzSkHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for CzSkHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let sum: u32 = (0..10)
            .map(|i| digit_at(bban, 10 + i) * MULTIPLIERS[i])
            .sum();

        Ok(sum % 11 == 0)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            let branch = &caps[1];
            let account = &caps[2];
            let bank = &caps[3];
            return Some(format!("{}{:0>6}{}", bank, branch, account));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let bank = &bban[0..4];
        let branch = bban[4..10].trim_start_matches('0');
        let account = &bban[10..];

        format!("{}-{}/{}", branch, account, bank)
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn weighted_account_sum_mod_eleven() {
        let handler = handler_for("CZ", vec![]);
        assert_eq!(handler.is_valid_checksum("08000000192000145399"), Ok(true));
        assert_eq!(handler.is_valid_checksum("08000000192000145398"), Ok(false));
        assert_eq!(handler.is_valid_checksum("0800000019200014539"), Ok(false));
    }

    #[test]
    fn slovakia_shares_the_scheme() {
        let handler = handler_for("SK", vec![]);
        assert_eq!(handler.is_valid_checksum("09000000001987426353"), Ok(true));
    }

    #[test]
    fn preformat_local_form() {
        let handler = handler_for("CZ", vec![]);
        assert_eq!(
            handler.preformat("19-2000145399/0800").as_deref(),
            Some("08000000192000145399")
        );
        assert_eq!(
            handler.preformat("08000000192000145399").as_deref(),
            Some("08000000192000145399")
        );
        assert_eq!(handler.preformat("19/0800"), None);
    }

    #[test]
    fn format_restores_local_shape() {
        let handler = handler_for("CZ", vec![]);
        assert_eq!(
            handler.format("08000000192000145399"),
            "19-2000145399/0800"
        );
    }
}
