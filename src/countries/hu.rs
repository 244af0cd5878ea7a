use lazy_static::lazy_static;
use regex::Regex;

use crate::bban::{BbanHandler, HandlerContext};
use crate::checksum::digit_at;
use crate::error::IbanError;

lazy_static! {
    static ref NOT_NUMERIC: Regex = Regex::new("[^0-9]").unwrap();
}

const MULTIPLIERS: [u32; 4] = [9, 7, 3, 1];

/// Hungary: 9-7-3-1 weighted account check per the national bank's
/// 18/2009 regulation. Accounts come in a 16-digit short form that
/// zero-extends to the full 24-digit BBAN.
pub(crate) struct HuHandler {
    ctx: HandlerContext,
}

impl HuHandler {
    pub(crate) fn new(ctx: HandlerContext) -> Self {
        Self { ctx }
    }
}

impl BbanHandler for HuHandler {
    fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    fn is_valid_checksum(&self, bban: &str) -> Result<bool, IbanError> {
        if !self.is_valid_length(bban) {
            return Ok(false);
        }

        // the bank code's checksum is not re-derived, the codes come from
        // a published list
        let account = if bban.len() - 8 == 8 {
            format!("{}00000000", &bban[8..])
        } else {
            bban[8..].to_string()
        };

        let sum: u32 = (0..16)
            .map(|i| digit_at(&account, i) * MULTIPLIERS[i % 4])
            .sum();

        Ok(sum % 10 == 0)
    }

    fn is_valid_bankcode(&self, bban: &str) -> bool {
        // bank + branch + check digit together select the institution
        let Some(bank_code) = bban.get(0..8) else {
            return false;
        };

        !self
            .ctx
            .banks
            .entries_for(&self.ctx.country, bank_code)
            .is_empty()
    }

    fn preformat(&self, bban: &str) -> Option<String> {
        let stripped = NOT_NUMERIC.replace_all(bban, "");

        match stripped.len() {
            16 => Some(format!("{}00000000", stripped)),
            24 => Some(stripped.into_owned()),
            _ => None,
        }
    }

    fn trim(&self, bban: &str) -> String {
        if bban.len() > 8 && bban.ends_with("00000000") {
            return bban[0..bban.len() - 8].to_string();
        }

        bban.to_string()
    }

    fn format(&self, bban: &str) -> String {
        if bban.len() != 16 && bban.len() != 24 {
            return bban.to_string();
        }

        let mut result = format!("{}-{}", &bban[0..8], &bban[8..16]);
        if bban.len() == 24 {
            result.push('-');
            result.push_str(&bban[16..]);
        }

        result
    }
}

#[cfg(test)]
mod test {
    use crate::bban::BbanHandler;
    use crate::bic::BankEntry;
    use crate::countries::testutil::handler_for;

    fn otp_entry() -> BankEntry {
        BankEntry {
            country_code: "HU".to_string(),
            bank_code: "11764379".to_string(),
            name: "OTP".to_string(),
            short_name: "OTP".to_string(),
            bic: "OTPVHUHB".to_string(),
            primary: true,
            checksum_algo: None,
        }
    }

    #[test]
    fn weighted_account_check() {
        let handler = handler_for("HU", vec![]);
        assert_eq!(
            handler.is_valid_checksum("117643794089288300000000"),
            Ok(true)
        );
        assert_eq!(
            handler.is_valid_checksum("117643794089288400000000"),
            Ok(false)
        );
    }

    #[test]
    fn bankcode_uses_the_full_eight_digit_prefix() {
        let handler = handler_for("HU", vec![otp_entry()]);
        assert!(handler.is_valid_bankcode("117643794089288300000000"));
        assert!(!handler.is_valid_bankcode("117643804089288300000000"));
    }

    #[test]
    fn preformat_extends_short_accounts() {
        let handler = handler_for("HU", vec![]);
        assert_eq!(
            handler.preformat("11764379-40892883").as_deref(),
            Some("117643794089288300000000")
        );
        assert_eq!(
            handler.preformat("11764379-40892883-00000000").as_deref(),
            Some("117643794089288300000000")
        );
        assert_eq!(handler.preformat("11764379-408928"), None);
    }

    #[test]
    fn trim_and_format() {
        let handler = handler_for("HU", vec![]);
        assert_eq!(
            handler.trim("117643794089288300000000"),
            "1176437940892883"
        );
        assert_eq!(
            handler.format("117643794089288300000000"),
            "11764379-40892883-00000000"
        );
        assert_eq!(
            handler.format(&handler.trim("117643794089288300000000")),
            "11764379-40892883"
        );
    }

    #[test]
    fn full_pipeline() {
        let handler = handler_for("HU", vec![otp_entry()]);
        assert_eq!(handler.is_valid("117643794089288300000000"), Ok(true));
    }
}
