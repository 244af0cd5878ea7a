use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::mod97_str;
use crate::error::IbanError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s").unwrap();
    static ref ALPHANUMERIC: Regex =
        Regex::new("^.*([0-9]{5}[0-9]{5}[0-9A-Z]{11}[0-9]{2}).*$").unwrap();
}

// RIB letter values: A-I map to 1-9, J-R map to 1-9, S-Z map to 2-9
const RIB_LETTERS: [u8; 26] = [
    b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', //
    b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', //
    b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9',
];

/// France and the territories using the French layout: the RIB key makes
/// the whole 23-character BBAN vanish modulo 97 after the RIB letter
/// substitution.
pub(crate) struct FrHandler {
    ctx: HandlerContext,
}

impl FrHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }

    fn to_rib_numeric(bban: &str) -> Option<String> {
        let mut result = String::with_capacity(bban.len());

        for b in bban.bytes() {
            match b {
                b'0'..=b'9' => result.push(b as char),
                b'A'..=b'Z' => result.push(RIB_LETTERS[(b - b'A') as usize] as char),
                _ => return None,
            }
        }

        Some(result)
    }
}

impl BbanHandler for FrHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if bban.len() != 23 {
            return Ok(false);
        }

        match Self::to_rib_numeric(bban) {
            Some(numeric) => Ok(mod97_str(&numeric) == 0),
            None => Ok(false),
        }
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let trimmed = WHITESPACE.replace_all(bban, "");

        ALPHANUMERIC
            .captures(&trimmed)
            .map(|caps| caps[1].to_string())
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != self.ctx.structure.bban_length {
            return bban.to_string();
        }

        let bank = &bban[0..5]; // "code banque"
        let branch = &bban[5..10]; // "code guichet"
        let account = &bban[10..21];
        let key = &bban[21..23];

        format!("{} {} {} {}", bank, branch, account, key)
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn rib_key_with_letter_substitution() {
        let handler = handler_for("FR", vec![]);
        assert_eq!(
            handler.is_valid_checksum("20041010050500013M02606"),
            Ok(true)
        );
        assert_eq!(
            handler.is_valid_checksum("20041010050500013M02607"),
            Ok(false)
        );
        assert_eq!(handler.is_valid_checksum("20041010050500013M026"), Ok(false));
    }

    #[test]
    fn territories_share_the_handler() {
        let handler = handler_for("MC", vec![]);
        assert_eq!(
            handler.preformat("20041 01005 0500013M026 06").as_deref(),
            Some("20041010050500013M02606")
        );
    }

    #[test]
    fn format_is_the_rib_layout() {
        let handler = handler_for("FR", vec![]);
        assert_eq!(
            handler.format("20041010050500013M02606"),
            "20041 01005 0500013M026 06"
        );
    }

    #[test]
    fn full_pipeline() {
        let handler = handler_for("FR", vec![]);
        assert_eq!(handler.is_valid("20041010050500013M02606"), Ok(true));
    }
}
