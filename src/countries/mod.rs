//! Per-country BBAN handlers.
//!
//! One module per jurisdiction; countries sharing an implementation (the
//! Czech/Slovak account scheme, the French-zone territories) register one
//! handler type under several country codes.

mod at;
mod ba;
mod be;
mod bg;
mod ch;
mod cz_sk;
mod de;
mod ee;
mod es;
mod fi;
mod fr;
mod gb;
mod hr;
mod hu;
mod ie;
mod is_;
mod it;
mod lu;
mod me;
mod mk;
mod mt;
mod nl;
mod no;
mod pt;
mod rs;
mod se;
mod si;
mod tr;

use std::sync::Arc;

use ahash::AHashMap;

use crate::bban::{BbanHandler, ExtValidator, HandlerContext};
use crate::bic::BankRegistry;
use crate::structure::IbanStructureTable;

type HandlerFactory = fn(HandlerContext) -> Arc<dyn BbanHandler>;

// Liechtenstein shares the Swiss account shape; the CEMAC territories and
// Monaco use the French layout; Slovakia kept the Czechoslovak scheme.
#[rustfmt::skip]
const REGISTRATIONS: &[(&str, HandlerFactory)] = &[
    ("AT", |ctx| Arc::new(at::AtHandler::new(ctx))),
    ("BA", |ctx| Arc::new(ba::BaHandler::new(ctx))),
    ("BE", |ctx| Arc::new(be::BeHandler::new(ctx))),
    ("BG", |ctx| Arc::new(bg::BgHandler::new(ctx))),
    ("CF", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("CG", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("CH", |ctx| Arc::new(ch::ChHandler::new(ctx))),
    ("CZ", |ctx| Arc::new(cz_sk::CzSkHandler::new(ctx))),
    ("DE", |ctx| Arc::new(de::DeHandler::new(ctx))),
    ("DJ", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("EE", |ctx| Arc::new(ee::EeHandler::new(ctx))),
    ("ES", |ctx| Arc::new(es::EsHandler::new(ctx))),
    ("FI", |ctx| Arc::new(fi::FiHandler::new(ctx))),
    ("FR", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("GA", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("GB", |ctx| Arc::new(gb::GbHandler::new(ctx))),
    ("GQ", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("HR", |ctx| Arc::new(hr::HrHandler::new(ctx))),
    ("HU", |ctx| Arc::new(hu::HuHandler::new(ctx))),
    ("IE", |ctx| Arc::new(ie::IeHandler::new(ctx))),
    ("IS", |ctx| Arc::new(is_::IsHandler::new(ctx))),
    ("IT", |ctx| Arc::new(it::ItHandler::new(ctx))),
    ("KM", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("LI", |ctx| Arc::new(ch::ChHandler::new(ctx))),
    ("LU", |ctx| Arc::new(lu::LuHandler::new(ctx))),
    ("MC", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("ME", |ctx| Arc::new(me::MeHandler::new(ctx))),
    ("MK", |ctx| Arc::new(mk::MkHandler::new(ctx))),
    ("MT", |ctx| Arc::new(mt::MtHandler::new(ctx))),
    ("NL", |ctx| Arc::new(nl::NlHandler::new(ctx))),
    ("NO", |ctx| Arc::new(no::NoHandler::new(ctx))),
    ("PT", |ctx| Arc::new(pt::PtHandler::new(ctx))),
    ("RS", |ctx| Arc::new(rs::RsHandler::new(ctx))),
    ("SE", |ctx| Arc::new(se::SeHandler::new(ctx))),
    ("SI", |ctx| Arc::new(si::SiHandler::new(ctx))),
    ("SK", |ctx| Arc::new(cz_sk::CzSkHandler::new(ctx))),
    ("TD", |ctx| Arc::new(fr::FrHandler::new(ctx))),
    ("TR", |ctx| Arc::new(tr::TrHandler::new(ctx))),
];

/// Instantiates every supported country handler against the frozen
/// reference tables. Countries missing from the structure table are
/// skipped; their lookups then fall back to the generic checks.
pub(crate) fn build_handlers(
    structures: &IbanStructureTable,
    banks: &Arc<BankRegistry>,
    ext_hooks: &mut AHashMap<String, Arc<ExtValidator>>,
) -> AHashMap<String, Arc<dyn BbanHandler>> {
    let mut handlers: AHashMap<String, Arc<dyn BbanHandler>> = AHashMap::new();

    for &(country, factory) in REGISTRATIONS {
        let Some(structure) = structures.get(country) else {
            continue;
        };

        let mut ctx = HandlerContext::new(country, structure.clone(), Arc::clone(banks));
        ctx.ext = ext_hooks.remove(country);
        handlers.insert(country.to_string(), factory(ctx));
    }

    handlers
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::bic::BankEntry;

    /// Handler wired to the built-in structure table and the given bank
    /// entries, for per-country unit tests.
    pub(crate) fn handler_for(
        country: &str,
        entries: Vec<BankEntry>,
    ) -> Arc<dyn BbanHandler> {
        let structures = IbanStructureTable::builtin();
        let banks = Arc::new(BankRegistry::from_entries(entries));
        let mut hooks = AHashMap::new();
        let handlers = build_handlers(&structures, &banks, &mut hooks);
        Arc::clone(handlers.get(country).expect("handler registered"))
    }
}
