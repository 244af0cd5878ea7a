use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{20}).*$").unwrap();
}

const WEIGHTS: [u32; 10] = [1, 2, 4, 8, 5, 10, 9, 7, 3, 6];

/// Spain: two check digits at positions 8 and 9, the first over the
/// zero-extended bank+branch pair, the second over the account number.
pub(crate) struct EsHandler {
    ctx: HandlerContext,
}

impl EsHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }

    /// Weighted mod-11 digit over ten digits; a raw result of 11 maps to
    /// 0 and 10 maps to 1, per the published national rule.
    fn mod11(digits: &str) -> u32 {
        let sum: u32 = digits
            .bytes()
            .zip(WEIGHTS.iter())
            .map(|(b, w)| (b - b'0') as u32 * w)
            .sum();

        let check = (11 - sum % 11) % 11;
        if check != 10 {
            check
        } else {
            1
        }
    }
}

impl BbanHandler for EsHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let check_1 = Self::mod11(&format!("00{}", &bban[0..8]));
        let check_2 = Self::mod11(&bban[10..]);

        Ok(check_1 == digit_at(bban, 8) && check_2 == digit_at(bban, 9))
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
    fn both_check_digits_must_hold() {
        let handler = handler_for("ES", vec![]);
        // the weighted sums run over digit values, not their character
        // codes; 2100 0418 / 45 / 0200051332 is a published sample pair
        assert_eq!(handler.is_valid_checksum("21000418450200051332"), Ok(true));
        // first check digit corrupted
        assert_eq!(handler.is_valid_checksum("21000418550200051332"), Ok(false));
        // second check digit corrupted
        assert_eq!(handler.is_valid_checksum("21000418460200051332"), Ok(false));
    }

    #[test]
    fn preformat_requires_twenty_digits() {
        let handler = handler_for("ES", vec![]);
        assert_eq!(
            handler.preformat("2100 0418 45 0200051332").as_deref(),
            Some("21000418450200051332")
        );
        assert_eq!(handler.preformat("2100 0418"), None);
    }

    #[test]
    fn full_pipeline() {
        let handler = handler_for("ES", vec![]);
        assert_eq!(handler.is_valid("21000418450200051332"), Ok(true));
    }
}
