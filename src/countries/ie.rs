use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex = Regex::new("^.*([0-9A-Z]{4}[0-9]{14}).*$").unwrap();
    static ref FORMATTED: Regex = Regex::new(
        "^[^0-9A-Z]*([0-9A-Z]{4})([0-9]{2})-?([0-9]{2})-?([0-9]{2})([0-9]{1,8}).*$"
    )
    .unwrap();
}

/// Ireland: BIC-derived bank code plus sort code plus account. No common
/// national checksum; the per-bank rules are not public.
pub(crate) struct IeHandler {
    ctx: HandlerContext,
}

impl IeHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for IeHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if let Some(caps) = FORMATTED.captures(&trimmed) {
            let bank = &caps[1];
            let sort_1 = &caps[2]; // the sort code lands in the branch field
            let sort_2 = &caps[3];
            let sort_3 = &caps[4];
            let account = &caps[5];

            return Some(format!(
                "{}{}{}{}{:0>8}",
                bank, sort_1, sort_2, sort_3, account
            ));
        }

        ALPHANUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!(
            "{} {}-{}-{}-{}",
            &bban[0..4],
            &bban[4..6],
            &bban[6..8],
            &bban[8..10],
            &bban[10..]
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn sort_code_forms() {
        let handler = handler_for("IE", vec![]);
        assert_eq!(
            handler.preformat("AIBK 93-11-52 7904368").as_deref(),
            Some("AIBK93115207904368")
        );
        assert_eq!(
            handler.preformat("AIBK93115212345678").as_deref(),
            Some("AIBK93115212345678")
        );
    }

    #[test]
    fn format_restores_sort_code() {
        let handler = handler_for("IE", vec![]);
        assert_eq!(
            handler.format("AIBK93115212345678"),
            "AIBK 93-11-52-12345678"
        );
    }
}
