use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref NOT_NUMERIC: Regex = Regex::new("[^0-9]").unwrap();
}

/// Croatia: the account part carries an ISO 7064 mod-11,10 check digit.
/// The bank code's own check digit is not re-derived, the codes come from
/// a published list.
pub(crate) struct HrHandler {
    ctx: HandlerContext,
}

impl HrHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }

    /// ISO 7064 mod-11,10 over a digit string (digits only, which is all
    /// Croatian identifiers contain).
    fn iso7064_mod11_10(digits: &str) -> u32 {
        let mut part = 10u32;

        for b in digits.bytes() {
            part = (part + (b - b'0') as u32) % 10;
            part = if part != 0 { part * 2 } else { 20 };
            part %= 11;
        }

        11 - part
    }
}

impl BbanHandler for HrHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let check = Self::iso7064_mod11_10(&bban[7..16]) % 10;
        Ok(check == digit_at(bban, 16))
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        Some(NOT_NUMERIC.replace_all(bban, "").into_owned())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{}-{}", &bban[0..7], &bban[7..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn account_check_digit() {
        let handler = handler_for("HR", vec![]);
        assert_eq!(handler.is_valid_checksum("10010051863000160"), Ok(true));
        assert_eq!(handler.is_valid_checksum("10010051863000161"), Ok(false));
    }

    #[test]
    fn preformat_strips_separators() {
        let handler = handler_for("HR", vec![]);
        assert_eq!(
            handler.preformat("1001005-1863000160").as_deref(),
            Some("10010051863000160")
        );
    }

    #[test]
    fn format_splits_bank_and_account() {
        let handler = handler_for("HR", vec![]);
        assert_eq!(handler.format("10010051863000160"), "1001005-1863000160");
    }
}
