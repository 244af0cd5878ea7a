use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref NUMERIC: Regex = Regex::new("^.*([0-9]{12}).*$").unwrap();
    static ref FORMATTED: Regex =
        Regex::new("^[^0-9]*([0-9]{3})-([0-9]{1,7})-([0-9]{2}).*$").unwrap();
}

/// Belgium: the first ten digits taken as a number, modulo 97, must equal
/// the trailing two-digit check pair.
pub(crate) struct BeHandler {
    ctx: HandlerContext,
}

impl BeHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for BeHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        // ten digits fit a 64-bit integer with lots of headroom
        let account: u64 = match bban[0..10].parse() {
            Ok(value) => value,
            Err(_) => return Ok(false),
        };
        let check: u64 = match bban[10..].parse() {
            Ok(value) => value,
            Err(_) => return Ok(false),
        };

        Ok(account % 97 == check)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        // a separator-written number is most probably the local format
        if let Some(caps) = FORMATTED.captures(&trimmed) {
            let bank = &caps[1];
            let account = &caps[2];
            let check = &caps[3];
            return Some(format!("{}{:0>7}{}", bank, account, check));
        }

        NUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let bank = &bban[0..3];
        let account = bban[3..10].trim_start_matches('0');
        let check = &bban[10..];

        format!("{}-{}-{}", bank, account, check)
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn account_mod_97_equals_check_pair() {
        let handler = handler_for("BE", vec![]);
        // 7310060264 % 97 == 2
        assert_eq!(handler.is_valid_checksum("731006026402"), Ok(true));
        assert_eq!(handler.is_valid_checksum("731006026403"), Ok(false));
        assert_eq!(handler.is_valid_checksum("73100602640"), Ok(false));
    }

    #[test]
    fn preformat_local_form() {
        let handler = handler_for("BE", vec![]);
        assert_eq!(
            handler.preformat("731-60264-02").as_deref(),
            Some("731006026402")
        );
        assert_eq!(
            handler.preformat("731006026402").as_deref(),
            Some("731006026402")
        );
        assert_eq!(handler.preformat("731-6026402"), None);
    }

    #[test]
    fn format_drops_leading_account_zeros() {
        let handler = handler_for("BE", vec![]);
        assert_eq!(handler.format("731006026402"), "731-60264-02");
    }

    #[test]
    fn formatting_is_idempotent() {
        let handler = handler_for("BE", vec![]);
        let formatted = handler.format("731006026402");
        let reparsed = handler.preformat(&formatted).unwrap();
        assert_eq!(handler.format(&reparsed), formatted);
    }
}
