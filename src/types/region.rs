//! Defines the hemisphere enums and the resolved-region descriptor returned by
//! coordinate resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hemisphere as resolved for a concrete coordinate.
///
/// Serialized in lowercase ("northern" / "southern"), matching the spelling the
/// hemisphere dataset files are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    /// Classifies a latitude: the equator and everything north of it is
    /// [`Hemisphere::Northern`], strictly negative latitudes are
    /// [`Hemisphere::Southern`].
    ///
    /// # Examples
    ///
    /// ```
    /// use climatlas::Hemisphere;
    ///
    /// assert_eq!(Hemisphere::of_latitude(28.6), Hemisphere::Northern);
    /// assert_eq!(Hemisphere::of_latitude(-33.9), Hemisphere::Southern);
    /// assert_eq!(Hemisphere::of_latitude(0.0), Hemisphere::Northern);
    /// ```
    pub fn of_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Hemisphere::Northern => "Northern",
            Hemisphere::Southern => "Southern",
        }
    }
}

/// Formats the hemisphere with its capitalized name, as used in forecast
/// `data_source` labels.
///
/// # Examples
///
/// ```
/// use climatlas::Hemisphere;
///
/// assert_eq!(format!("{}", Hemisphere::Northern), "Northern");
/// assert_eq!(Hemisphere::Southern.to_string(), "Southern");
/// ```
impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The hemisphere a mapping entry declares for its region.
///
/// Region boxes that straddle the equator are tagged `Mixed` in the mapping
/// file and take the hemisphere computed from the queried latitude instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DeclaredHemisphere {
    Northern,
    Southern,
    Mixed,
}

impl DeclaredHemisphere {
    /// Collapses the declaration to a concrete hemisphere, substituting the
    /// computed one for `Mixed`.
    pub fn resolve(self, computed: Hemisphere) -> Hemisphere {
        match self {
            DeclaredHemisphere::Northern => Hemisphere::Northern,
            DeclaredHemisphere::Southern => Hemisphere::Southern,
            DeclaredHemisphere::Mixed => computed,
        }
    }
}

/// The outcome of resolving a coordinate against the location mapping.
///
/// `continent` is `None` when the coordinate fell outside every mapped region
/// box; the hemisphere is always present. Downstream forecast synthesis treats
/// the two fields as independent fallback keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionDescriptor {
    /// Continent id (mapping key, e.g. `"asia"`), if any region box matched.
    pub continent: Option<String>,
    /// Resolved hemisphere, declared by the matched region or computed from
    /// the latitude.
    pub hemisphere: Hemisphere,
}

impl RegionDescriptor {
    /// The fixed descriptor handed out before any dataset has been ingested.
    ///
    /// Keeps resolution deterministic while data is still loading; the
    /// continent defaults to `"asia"` and the hemisphere to northern.
    pub fn bootstrap() -> Self {
        RegionDescriptor {
            continent: Some("asia".to_string()),
            hemisphere: Hemisphere::Northern,
        }
    }
}
