use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref NOT_ALPHANUMERIC: Regex = Regex::new("[^0-9A-Z]").unwrap();
}

/// Malta: no published national checksum and no formal presentation
/// standard; the three-piece rendering keeps all information visible.
pub(crate) struct MtHandler {
    ctx: HandlerContext,
}

impl MtHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for MtHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        Some(NOT_ALPHANUMERIC.replace_all(bban, "").into_owned())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{} {} {}", &bban[0..4], &bban[4..9], &bban[9..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn preformat_strips_separators() {
        let handler = handler_for("MT", vec![]);
        assert_eq!(
            handler.preformat("MALT 01100 0012345MTLCAST001S").as_deref(),
            Some("MALT011000012345MTLCAST001S")
        );
    }

    #[test]
    fn format_splits_bank_sort_account() {
        let handler = handler_for("MT", vec![]);
        assert_eq!(
            handler.format("MALT011000012345MTLCAST001S"),
            "MALT 01100 0012345MTLCAST001S"
        );
    }
}
