use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::{mod97_str, to_numeric};
use crate::error::IbanError;

lazy_static! {
    static ref NOT_ALPHANUMERIC: Regex = Regex::new("[^0-9A-Z]").unwrap();
}

/// Portugal: the NIB ends in two ISO 7064 mod-97-10 check digits over the
/// leading 19 digits.
pub(crate) struct PtHandler {
    ctx: HandlerContext,
}

impl PtHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for PtHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        let Some(numeric) = to_numeric(&bban[0..19]) else {
            return Ok(false);
        };

        let check = (98 - mod97_str(&format!("{}00", numeric))) % 97;
        Ok(format!("{:02}", check) == bban[19..21])
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        Some(NOT_ALPHANUMERIC.replace_all(bban, "").into_owned())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        format!(
            "{}.{}.{}.{}",
            &bban[0..4],
            &bban[4..9],
            &bban[9..20],
            &bban[20..]
        )
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn nib_check_digits() {
        let handler = handler_for("PT", vec![]);
        assert_eq!(
            handler.is_valid_checksum("000201231234567890154"),
            Ok(true)
        );
        assert_eq!(
            handler.is_valid_checksum("000201231234567890145"),
            Ok(false)
        );
    }

    #[test]
    fn preformat_and_format() {
        let handler = handler_for("PT", vec![]);
        assert_eq!(
            handler.preformat("0002.01231.23456789015.4").as_deref(),
            Some("000201231234567890154")
        );
        assert_eq!(
            handler.format("000201231234567890154"),
            "0002.01231.23456789015.4"
        );
    }
}
