//! Glass dispersion

use dof_core::math::*;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Six dispersion coefficients. Sellmeier glasses store `[B1, B2, B3, C1,
/// C2, C3]`; anything whose last coefficient is not above 1 is evaluated as
/// the polynomial `n^2 = c0 + c1 w^2 + c2 w^-2 + c3 w^-4 + c4 w^-6 + c5 w^-8`.
pub type DispersionCoefficients = [Float; 6];

/// Coefficients for air (n = 1 at every wavelength).
pub const AIR_COEFFICIENTS: DispersionCoefficients = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];

/// Name used for air in prescriptions.
pub const AIR: &str = "AIR";

/// Returns the refractive index for a wavelength.
///
/// * `wavelength` - Wavelength in micrometers.
/// * `c`          - Dispersion coefficients.
#[inline]
pub fn refractive_index(wavelength: Float, c: &DispersionCoefficients) -> Float {
    let w2 = wavelength * wavelength;
    if c[5] > 1.0 {
        (1.0 + c[0] * w2 / (w2 - c[3]) + c[1] * w2 / (w2 - c[4]) + c[2] * w2 / (w2 - c[5])).sqrt()
    } else {
        let w2inv = 1.0 / w2;
        let w4inv = w2inv * w2inv;
        let w6inv = w4inv * w2inv;
        let w8inv = w4inv * w4inv;
        (c[0] + c[1] * w2 + c[2] * w2inv + c[3] * w4inv + c[4] * w6inv + c[5] * w8inv).sqrt()
    }
}

/// An optical medium between two surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Medium {
    /// Catalog name.
    pub name: String,

    /// Dispersion coefficients.
    pub coefficients: DispersionCoefficients,
}

impl Medium {
    /// Create a new medium.
    ///
    /// * `name`         - Catalog name.
    /// * `coefficients` - Dispersion coefficients.
    pub fn new(name: &str, coefficients: DispersionCoefficients) -> Self {
        Self {
            name: name.to_string(),
            coefficients,
        }
    }

    /// Returns air.
    pub fn air() -> Self {
        Self::new(AIR, AIR_COEFFICIENTS)
    }

    /// Returns the refractive index for a wavelength.
    ///
    /// * `wavelength` - Wavelength in micrometers.
    pub fn index(&self, wavelength: Float) -> Float {
        refractive_index(wavelength, &self.coefficients)
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Maps glass names to dispersion coefficients. Lookups ignore case.
#[derive(Clone, Debug, Default)]
pub struct GlassCatalog {
    glasses: HashMap<String, DispersionCoefficients>,
}

impl GlassCatalog {
    /// Returns an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a catalog holding the built-in glasses.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(AIR, AIR_COEFFICIENTS);
        for (name, b, c) in BUILTIN_SELLMEIER {
            catalog.insert(name, [b[0], b[1], b[2], c[0], c[1], c[2]]);
        }
        catalog
    }

    /// Adds or replaces a glass.
    ///
    /// * `name`         - Glass name.
    /// * `coefficients` - Dispersion coefficients.
    pub fn insert(&mut self, name: &str, coefficients: DispersionCoefficients) {
        self.glasses.insert(name.to_uppercase(), coefficients);
    }

    /// Returns the coefficients for a glass.
    ///
    /// * `name` - Glass name.
    pub fn get(&self, name: &str) -> Option<DispersionCoefficients> {
        self.glasses.get(&name.to_uppercase()).copied()
    }

    /// Returns the medium for a glass name.
    ///
    /// * `name` - Glass name.
    pub fn medium(&self, name: &str) -> Result<Medium, String> {
        self.get(name)
            .map(|c| Medium::new(&name.to_uppercase(), c))
            .ok_or_else(|| format!("Unknown glass '{name}'"))
    }

    /// Returns the number of glasses.
    pub fn len(&self) -> usize {
        self.glasses.len()
    }

    /// Returns true if there are no glasses.
    pub fn is_empty(&self) -> bool {
        self.glasses.is_empty()
    }
}

/// Sellmeier coefficients (B1..B3, C1..C3 in um^2) for the built-in glasses.
const BUILTIN_SELLMEIER: [(&str, [Float; 3], [Float; 3]); 10] = [
    (
        "N-BK7",
        [1.03961212, 0.231792344, 1.01046945],
        [0.00600069867, 0.0200179144, 103.560653],
    ),
    (
        "BK7",
        [1.03961212, 0.231792344, 1.01046945],
        [0.00600069867, 0.0200179144, 103.560653],
    ),
    (
        "N-SF5",
        [1.52481889, 0.187085527, 1.42729015],
        [0.011254756, 0.0588995392, 129.141675],
    ),
    (
        "F2",
        [1.34533359, 0.209073176, 0.937357162],
        [0.00997743871, 0.0470450767, 111.886764],
    ),
    (
        "SF2",
        [1.40301821, 0.231767504, 0.939056586],
        [0.0105795466, 0.0493226978, 112.405955],
    ),
    (
        "N-SK16",
        [1.34317774, 0.241144399, 0.994317969],
        [0.00704687339, 0.0229005, 92.7508526],
    ),
    (
        "N-LAK9",
        [1.46231905, 0.344399589, 1.15508372],
        [0.00724270156, 0.0243353131, 85.4686868],
    ),
    (
        "N-BAF10",
        [1.5851495, 0.143559385, 1.08521269],
        [0.00926681282, 0.0424489805, 105.613573],
    ),
    (
        "N-SF6",
        [1.77931763, 0.338149866, 2.08734474],
        [0.0133714182, 0.0617533621, 174.01759],
    ),
    (
        "F_SILICA",
        [0.6961663, 0.4079426, 0.8974794],
        [0.004679148, 0.013512063, 97.934003],
    ),
];

lazy_static! {
    static ref BUILTIN_CATALOG: Arc<GlassCatalog> = Arc::new(GlassCatalog::builtin());
}

/// Returns the shared built-in catalog.
pub fn builtin_catalog() -> Arc<GlassCatalog> {
    Arc::clone(&BUILTIN_CATALOG)
}
