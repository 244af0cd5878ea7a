use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum;
use crate::error::IbanError;

lazy_static! {
    static ref NOT_NUMERIC: Regex = Regex::new("[^0-9]").unwrap();
}

/// Bosnia and Herzegovina: the whole BBAN carries an ISO 7064 mod-97-10
/// check pair, so a conformant BBAN evaluates to 97.
pub(crate) struct BaHandler {
    ctx: HandlerContext,
}

impl BaHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for BaHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        Ok(checksum::mod97_check_value(bban) == Some(97))
    }

    fn is_valid_bankcode(&self, _bban: &str) -> bool {
        true
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        Some(NOT_NUMERIC.replace_all(bban, "").into_owned())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let bank = &bban[0..3];
        let branch = &bban[3..6];
        let account = &bban[6..14];
        let check = &bban[14..];

        format!("{}-{}-{}-{}", bank, branch, account, check)
    }
}
