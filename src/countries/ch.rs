use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref NOT_ALPHANUMERIC: Regex = Regex::new("[^0-9A-Z]").unwrap();
}

/// Switzerland and Liechtenstein: 5-digit clearing number plus a
/// 12-character account. Some banks use check digits, but the algorithms
/// are not published.
pub(crate) struct ChHandler {
    ctx: HandlerContext,
}

impl ChHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for ChHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, _bban: &str) -> Result<bool, IbanError> {
        Ok(true)
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let stripped = NOT_ALPHANUMERIC.replace_all(bban, "");

        if stripped.len() < 5 {
            return None;
        }

        let bank = &stripped[0..5];
        let account = &stripped[5..];
        if account.len() > 12 {
            return None;
        }

        Some(format!("{}{:0>12}", bank, account))
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!("{} {}", &bban[0..5], &bban[5..])
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn preformat_pads_account_to_twelve() {
        let handler = handler_for("CH", vec![]);
        assert_eq!(
            handler.preformat("00762 011623852957").as_deref(),
            Some("00762011623852957")
        );
        assert_eq!(
            handler.preformat("00762 95715").as_deref(),
            Some("00762000000095715")
        );
        assert_eq!(handler.preformat("007"), None);
    }

    #[test]
    fn liechtenstein_shares_the_handler() {
        let handler = handler_for("LI", vec![]);
        assert_eq!(
            handler.preformat("08810 2324013AA").as_deref(),
            Some("088100002324013AA")
        );
    }

    #[test]
    fn format_splits_bank_and_account() {
        let handler = handler_for("CH", vec![]);
        assert_eq!(handler.format("00762011623852957"), "00762 011623852957");
    }
}
