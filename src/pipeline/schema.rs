//! Catalog column names
//!
//! Analyses address columns through [`GaiaColumn`] rather than raw strings,
//! so a misspelt column name fails to compile instead of silently producing
//! an empty lookup.

use std::fmt;

/// Name of the column added by the dataset combiner.
pub const SAMPLE_COLUMN: &str = "sample";

/// Name of the derived magnitude-class label column.
pub const CLASS_COLUMN: &str = "mag_class";

/// Columns of the Gaia catalog extract used by the analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GaiaColumn {
    RaIcrs,
    DeIcrs,
    Plx,
    EPlx,
    PmRa,
    EPmRa,
    PmDe,
    EPmDe,
    Dup,
    Fg,
    EFg,
    Gmag,
    EGmag,
    Fbp,
    EFbp,
    BpMag,
    EBpMag,
    Frp,
    EFrp,
    RpMag,
    ERpMag,
    BpRp,
    Rv,
    ERv,
}

impl GaiaColumn {
    pub const ALL: [GaiaColumn; 24] = [
        GaiaColumn::RaIcrs,
        GaiaColumn::DeIcrs,
        GaiaColumn::Plx,
        GaiaColumn::EPlx,
        GaiaColumn::PmRa,
        GaiaColumn::EPmRa,
        GaiaColumn::PmDe,
        GaiaColumn::EPmDe,
        GaiaColumn::Dup,
        GaiaColumn::Fg,
        GaiaColumn::EFg,
        GaiaColumn::Gmag,
        GaiaColumn::EGmag,
        GaiaColumn::Fbp,
        GaiaColumn::EFbp,
        GaiaColumn::BpMag,
        GaiaColumn::EBpMag,
        GaiaColumn::Frp,
        GaiaColumn::EFrp,
        GaiaColumn::RpMag,
        GaiaColumn::ERpMag,
        GaiaColumn::BpRp,
        GaiaColumn::Rv,
        GaiaColumn::ERv,
    ];

    /// Header text as it appears in the catalog file.
    pub fn name(self) -> &'static str {
        match self {
            GaiaColumn::RaIcrs => "RA_ICRS",
            GaiaColumn::DeIcrs => "DE_ICRS",
            GaiaColumn::Plx => "Plx",
            GaiaColumn::EPlx => "e_Plx",
            GaiaColumn::PmRa => "pmRA",
            GaiaColumn::EPmRa => "e_pmRA",
            GaiaColumn::PmDe => "pmDE",
            GaiaColumn::EPmDe => "e_pmDE",
            GaiaColumn::Dup => "Dup",
            GaiaColumn::Fg => "FG",
            GaiaColumn::EFg => "e_FG",
            GaiaColumn::Gmag => "Gmag",
            GaiaColumn::EGmag => "e_Gmag",
            GaiaColumn::Fbp => "FBP",
            GaiaColumn::EFbp => "e_FBP",
            GaiaColumn::BpMag => "BPmag",
            GaiaColumn::EBpMag => "e_BPmag",
            GaiaColumn::Frp => "FRP",
            GaiaColumn::EFrp => "e_FRP",
            GaiaColumn::RpMag => "RPmag",
            GaiaColumn::ERpMag => "e_RPmag",
            GaiaColumn::BpRp => "BP-RP",
            GaiaColumn::Rv => "RV",
            GaiaColumn::ERv => "e_RV",
        }
    }

    /// Look up a column by header text. `BP.RP` is accepted for `BP-RP`,
    /// since spreadsheet exports often mangle the dash.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "BP.RP" {
            return Some(GaiaColumn::BpRp);
        }
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// True for the measurement-error counterparts (`e_*` columns).
    pub fn is_error_term(self) -> bool {
        self.name().starts_with("e_")
    }

    /// Error columns in catalog order.
    pub fn error_terms() -> impl Iterator<Item = GaiaColumn> {
        Self::ALL.into_iter().filter(|c| c.is_error_term())
    }
}

impl fmt::Display for GaiaColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for column in GaiaColumn::ALL {
            assert_eq!(GaiaColumn::from_name(column.name()), Some(column));
        }
    }

    #[test]
    fn test_bp_rp_alias() {
        assert_eq!(GaiaColumn::from_name("BP.RP"), Some(GaiaColumn::BpRp));
        assert_eq!(GaiaColumn::from_name("BP-RP"), Some(GaiaColumn::BpRp));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(GaiaColumn::from_name("gmag"), None);
    }

    #[test]
    fn test_error_terms() {
        let errors: Vec<_> = GaiaColumn::error_terms().collect();
        assert_eq!(errors.len(), 10);
        assert!(errors.contains(&GaiaColumn::EFg));
        assert!(!errors.contains(&GaiaColumn::Fg));
    }
}
