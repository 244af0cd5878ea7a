use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::error::IbanError;

lazy_static! {
    static ref NOT_NUMERIC: Regex = Regex::new("[^0-9]").unwrap();
}

const MULTIPLIERS: [u32; 3] = [7, 3, 1];

/// Estonia: the 2-digit bank prefix is repeated at the head of the account
/// number, and the account carries a 7-3-1 weighted check digit at the
/// end.
pub(crate) struct EeHandler {
    ctx: HandlerContext,
}

impl EeHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for EeHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        let bytes = bban.as_bytes();

        // first significant digit of the account part
        let mut p = 2;
        while p < bytes.len() && bytes[p] == b'0' {
            p += 1;
        }

        let (prefix_1, prefix_2) = match (bytes.get(p), bytes.get(p + 1)) {
            (Some(a), Some(b)) => (*a, *b),
            _ => return Ok(false),
        };
        if bytes[0] != prefix_1 || bytes[1] != prefix_2 {
            return Ok(false);
        }

        let mut sum = 0u32;
        for (i, b) in bban.bytes().rev().skip(1).take(bban.len() - p - 1).enumerate() {
            sum += (b - b'0') as u32 * MULTIPLIERS[i % 3];
        }

        let check = (10 - sum % 10) % 10;
        Ok(bytes.last().map(|b| (b - b'0') as u32) == Some(check))
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let stripped = NOT_NUMERIC.replace_all(bban, "").into_owned();

        // 16 digits is already a full BBAN, 15 is something strange
        if stripped.len() > 14 {
            return Some(stripped);
        }

        let stripped = stripped.trim_start_matches('0');
        if stripped.len() < 2 {
            return None;
        }

        let bank = &stripped[0..2];
        Some(format!("{}{:0>14}", bank, stripped))
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::countries::testutil::handler_for;

    #[test]
    fn check_digit_and_repeated_bank_prefix() {
        let handler = handler_for("EE", vec![]);
        assert_eq!(handler.is_valid_checksum("2200221020145685"), Ok(true));
        // corrupted check digit
        assert_eq!(handler.is_valid_checksum("2200221020145684"), Ok(false));
        // bank prefix not repeated in the account
        assert_eq!(handler.is_valid_checksum("1000221020145685"), Ok(false));
    }

    #[test]
    fn preformat_reinstates_bank_prefix() {
        let handler = handler_for("EE", vec![]);
        assert_eq!(
            handler.preformat("221020145685").as_deref(),
            Some("2200221020145685")
        );
        // full-width input passes through
        assert_eq!(
            handler.preformat("2200221020145685").as_deref(),
            Some("2200221020145685")
        );
    }

    #[test]
    fn full_pipeline() {
        let handler = handler_for("EE", vec![]);
        assert_eq!(handler.is_valid("2200221020145685"), Ok(true));
    }
}
