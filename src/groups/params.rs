//! Per-kind parameter bundles: one typed struct per `GroupKind` variant
//! rather than a single flat array indexed by magic constants.

/// Nutrient-limitation half-saturation constants shared by primary
/// producers and MPB; `si` is only used when `silicate_dependent`.
#[derive(Debug, Clone, Copy)]
pub struct NutrientHalfSaturation {
    pub nh: f64,
    pub no: f64,
    pub si: f64,
    pub fe: f64,
    pub p: f64,
}

#[derive(Debug, Clone)]
pub struct PhytoParams {
    pub mu_max: f64,
    pub k_light: f64,
    pub k_nutrient: NutrientHalfSaturation,
    pub silicate_dependent: bool,
    /// senescence: fraction of biomass lysed to DL per unit time.
    pub lysis_rate: f64,
    /// natural mortality applied when plankton sink into sediment
    ///
    pub sediment_mortality_rate: f64,
    /// above/below-ground death partition for macrophytes/seagrass
    /// (`FDL_SG_leaves`, `FDL_SG_roots`); `None` for non-macrophyte groups.
    pub macrophyte_split: Option<(f64, f64)>,
    /// bug-compat switch zeroing plankton mortality after growth.
    /// Carried as an explicit option per the open-question note, default
    /// `false`.
    pub replicate_old_ppmort_bug: bool,
}

#[derive(Debug, Clone)]
pub struct DinoflagellateParams {
    pub photo: PhytoParams,
    pub max_phagotrophy: f64,
    /// nutrient-stress-sensitive lysis scaling applied on top of the
    /// effective `hN` once grazing contribution is folded in.
    pub lysis_stress_gain: f64,
}

#[derive(Debug, Clone)]
pub struct BacteriaParams {
    pub mu_max: f64,
    /// saturation exponent `k` in `(1 - (PB_DL/(X*DL))^k)`; 3 when
    /// `flag_kdrop` is set, configurable otherwise.
    pub k: f64,
    pub flag_kdrop: bool,
    pub x_labile: f64,
    pub x_refractory: f64,
    pub e3_labile_efficiency: f64,
    pub e4_refractory_efficiency: f64,
    pub f_product_refractory: f64,
    pub f_product_don: f64,
    pub k_nit: f64,
    pub k_conc: f64,
    /// oxygen half-saturation for the `hO` gate.
    pub k_oxygen: f64,
}

/// Holling type-II consumer kernel, shared by zooplankton, benthos,
/// cephalopods, prawns, epibenthos, and filter feeders
#[derive(Debug, Clone)]
pub struct ConsumerParams {
    pub c_scalar: f64,
    pub mu_max: f64,
    pub k_l: f64,
    pub k_u: f64,
    pub vl: f64,
    pub ht: f64,
    pub e1: f64,
    pub e2: f64,
    pub e3: f64,
    pub e4: f64,
    /// quadratic ERSEM crowding (`true`) vs a simple linear cap against
    /// area-weighted max (`false`).
    pub ersem_crowding: bool,
    pub habitat_scaled_growth: bool,
    pub feeds_while_spawning: bool,
    pub mature_fraction: f64,
    pub linear_mortality: f64,
    pub oxygen_mortality_coeff: f64,
    /// depth scalar applied to phytoplankton/dinoflagellate prey when
    /// this consumer feeds from sediment or epibenthic habitat; zero for
    /// predators that aren't benthic feeders.
    pub k_dep: f64,
}

#[derive(Debug, Clone)]
pub struct CoralParams {
    pub symbiont: PhytoParams,
    pub heterotroph: ConsumerParams,
    /// space-competition weight against turf/algae cover.
    pub space_competition: f64,
    pub bleach_threshold: f64,
    pub bleach_rate: f64,
    pub recovery_rate: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct DetritusParams {
    /// first-order breakdown rate `r`; ignored when bacterial groups are
    /// active
    pub breakdown_rate: f64,
    pub f_refractory: f64,
    pub f_don: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CarrionParams {
    pub breakdown_rate: f64,
    pub f_refractory: f64,
}

/// The parameter bundle, tagged by `GroupKind` so the dispatcher's match
/// arm and the stored bundle can never disagree at runtime.
#[derive(Debug, Clone)]
pub enum GroupParams {
    Phyto(PhytoParams),
    Dinoflagellate(DinoflagellateParams),
    PelagicBacteria(BacteriaParams),
    SedimentBacteria(BacteriaParams),
    Consumer(ConsumerParams),
    Coral(CoralParams),
    Detritus(DetritusParams),
    Carrion(CarrionParams),
}
