use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref NOT_NUMERIC: Regex = Regex::new("[^0-9]").unwrap();
}

const WEIGHTS: [u32; 11] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2, 1];

/// Norway: an 11-digit kontonummer whose weighted sum vanishes modulo 11.
/// Accounts with `00` in the account-type positions carry no check digit.
pub(crate) struct NoHandler {
    ctx: HandlerContext,
}

impl NoHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for NoHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        if &bban[4..6] == "00" {
            return Ok(true);
        }

        let sum: u32 = (0..11).map(|i| digit_at(bban, i) * WEIGHTS[i]).sum();
        Ok(sum % 11 == 0)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        Some(NOT_NUMERIC.replace_all(bban, "").into_owned())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}.{}.{}", &bban[0..4], &bban[4..6], &bban[6..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn weighted_sum_mod_eleven() {
        let handler = handler_for("NO", vec![]);
        assert_eq!(handler.is_valid_checksum("86011117947"), Ok(true));
        assert_eq!(handler.is_valid_checksum("86011117948"), Ok(false));
    }

    #[test]
    fn double_zero_type_skips_the_check() {
        let handler = handler_for("NO", vec![]);
        assert_eq!(handler.is_valid_checksum("86010017948"), Ok(true));
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("NO", vec![]);
        assert_eq!(
            handler.preformat("8601.11.17947").as_deref(),
            Some("86011117947")
        );
        assert_eq!(handler.format("86011117947"), "8601.11.17947");
    }
}
