//! Tiered harvest control rules: a piecewise-linear "broken stick" of F
//! against estimated B, tiers 1-9/13/14.

/// Break points for the broken-stick control rule, expressed as absolute
/// biomass rather than `B0`-relative constants, so callers decide the
/// reference stock once and reuse it.
#[derive(Debug, Clone, Copy)]
pub struct BrokenStick {
    pub b_ref_a: f64,
    pub b_ref_b: f64,
    pub b_ref_e: f64,
    pub b_lim: f64,
    pub f_ref_a: f64,
}

/// Which tier-family shape applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// tiers 1-7 and 8: standard broken stick, `FTARG(Blim) = 0`,
    /// `FTARG(>=BrefA) = FrefA`.
    Standard,
    /// tier 9: rescales against `FrefA` for spin-up stability.
    SpinUp,
    /// tier 13: escapement formulation `F = 1 - Blim/BrefB`.
    Escapement,
    /// tier 14: closes fishing entirely below `BrefE`.
    ClosedBelowRefE,
}

/// Evaluates `FTARG` as a continuous, piecewise-linear function of
/// `b_curr`: continuous, `FTARG(Blim) = 0` for tiers 1-7, `FTARG(>=BrefA)
/// = FrefA`.
pub fn ftarg(tier: Tier, stick: BrokenStick, b_curr: f64) -> f64 {
    match tier {
        Tier::ClosedBelowRefE if b_curr < stick.b_ref_e => 0.0,
        Tier::Escapement => (1.0 - stick.b_lim / stick.b_ref_b.max(crate::EPSILON)).max(0.0),
        _ => broken_stick(stick, b_curr),
    }
}

/// Below `Blim`: closed. `Blim` to `BrefE`: zero-F shelf. `BrefE` to
/// `BrefB`: linear ramp reaching `FrefA`. At and above `BrefB` (up
/// through `BrefA` and beyond): flat `FrefA`. For example, with
/// BrefA=0.4B0, BrefB=0.3B0, Blim=0.2B0, FrefA=0.25, Bcurr=0.25B0, FTARG =
/// 0.25*(0.05/0.10) = 0.125 — the ramp spans Blim..BrefB, not Blim..BrefA.
fn broken_stick(stick: BrokenStick, b_curr: f64) -> f64 {
    if b_curr <= stick.b_lim || b_curr <= stick.b_ref_e {
        return 0.0;
    }
    if b_curr >= stick.b_ref_b {
        return stick.f_ref_a;
    }
    let span = (stick.b_ref_b - stick.b_ref_e).max(crate::EPSILON);
    stick.f_ref_a * (b_curr - stick.b_ref_e) / span
}

/// Whether to rescale per-species, per-guild (averaging F across a
/// configured guild), or via a system-wide tonnes cap with inverse
/// preference weights
#[derive(Debug, Clone)]
pub enum FOnlyRescale {
    PerSpecies,
    PerGuild { guild: Vec<crate::groups::GroupId> },
    EcosystemCap { tonnes_cap: f64, preference_weight: f64 },
}

/// projects catch under a single-species `f_targ` and, for
/// `EcosystemCap`, deducts the excess over the system cap proportionally
/// to `preference_weight`
pub fn mfc_scale(mode: &FOnlyRescale, f_targ: f64, f_curr: f64, projected_system_catch: f64) -> f64 {
    let base = if f_curr > crate::EPSILON { f_targ / f_curr } else { 0.0 };
    match mode {
        FOnlyRescale::PerSpecies | FOnlyRescale::PerGuild { .. } => base,
        FOnlyRescale::EcosystemCap {
            tonnes_cap,
            preference_weight,
        } => {
            if projected_system_catch <= *tonnes_cap || projected_system_catch <= crate::EPSILON {
                base
            } else {
                let excess_fraction = (projected_system_catch - tonnes_cap) / projected_system_catch;
                base * (1.0 - excess_fraction * preference_weight).max(0.0)
            }
        }
    }
}
