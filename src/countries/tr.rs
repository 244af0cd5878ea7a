use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
}

/// Turkey: checksums are bank-specific and unpublished, and the
/// 19-character local account numbers map to the 16-character IBAN
/// account field by an undocumented conversion, so only an already
/// IBAN-shaped account part is accepted.
pub(crate) struct TrHandler {
    ctx: HandlerContext,
}

impl TrHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for TrHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        if trimmed.len() == 16 {
            // a preformatted account part, bank code still missing
            return Some(trimmed.into_owned());
        }

        None
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{} {} {}", &bban[0..4], &bban[4..13], &bban[13..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn only_iban_shaped_accounts_are_accepted() {
        let handler = handler_for("TR", vec![]);
        assert_eq!(
            handler.preformat("0619 4457 8413 2655").as_deref(),
            Some("0619445784132655")
        );
        assert_eq!(handler.preformat("0010009999901234567890"), None);
    }

    #[test]
    fn format_splits_fixed_groups() {
        let handler = handler_for("TR", vec![]);
        assert_eq!(
            handler.format("0006100519786457841326"),
            "0006 100519786 457841326"
        );
    }
}
