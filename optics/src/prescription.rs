//! Lens prescription

use crate::glass::*;
use crate::parser::*;
use dof_core::math::*;
use std::fmt;

/// Surfaces with a clear aperture radius at or below this are virtual
/// markers (meters).
pub const VIRTUAL_APERTURE: Float = 1e-4;

/// Thicknesses above this are treated as infinite (meters).
pub const MAX_THICKNESS: Float = 1000.0;

/// Curvature used for flat surfaces (per file unit).
pub const FLAT_CURVATURE: Float = 0.001;

/// A spherical refracting surface centered on the optical axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LensSurface {
    /// Signed radius of curvature. Positive when the center of curvature lies
    /// behind the vertex.
    pub radius: Float,

    /// Axial position of the vertex.
    pub vertex: Float,

    /// Axial distance to the next surface.
    pub thickness: Float,

    /// Clear aperture radius.
    pub aperture: Float,
}

impl LensSurface {
    /// Create a new surface.
    ///
    /// * `radius`    - Signed radius of curvature.
    /// * `vertex`    - Axial position of the vertex.
    /// * `thickness` - Axial distance to the next surface.
    /// * `aperture`  - Clear aperture radius.
    pub fn new(radius: Float, vertex: Float, thickness: Float, aperture: Float) -> Self {
        Self {
            radius,
            vertex,
            thickness,
            aperture,
        }
    }

    /// Returns the axial position of the center of curvature.
    #[inline]
    pub fn center(&self) -> Float {
        self.vertex + self.radius
    }
}

/// An ordered sequence of surfaces with the media between them. `media[0]`
/// is object space and `media[i + 1]` fills the space after surface `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct LensPrescription {
    surfaces: Vec<LensSurface>,
    media: Vec<Medium>,
    stop: usize,
    stop_aperture: Float,
    aperture_scale: Float,
}

impl LensPrescription {
    /// Create a new prescription.
    ///
    /// * `surfaces` - Surfaces ordered front to back.
    /// * `media`    - One more medium than surfaces.
    /// * `stop`     - Index of the aperture stop.
    pub fn new(surfaces: Vec<LensSurface>, media: Vec<Medium>, stop: usize) -> Result<Self, String> {
        if surfaces.is_empty() {
            return Err("Lens has no active surfaces".to_string());
        }
        if media.len() != surfaces.len() + 1 {
            return Err(format!(
                "Lens with {} surfaces needs {} media, got {}",
                surfaces.len(),
                surfaces.len() + 1,
                media.len()
            ));
        }
        if stop >= surfaces.len() {
            return Err(format!("Stop index {} out of range", stop));
        }
        for (i, s) in surfaces.iter().enumerate() {
            if s.radius == 0.0 || !s.radius.is_finite() {
                return Err(format!("Surface {} has invalid radius {}", i, s.radius));
            }
            if !(s.aperture > 0.0) {
                return Err(format!("Surface {} has no aperture", i));
            }
        }
        if surfaces.windows(2).any(|w| w[1].vertex < w[0].vertex) {
            return Err("Surfaces are not ordered front to back".to_string());
        }

        let stop_aperture = surfaces[stop].aperture;
        Ok(Self {
            surfaces,
            media,
            stop,
            stop_aperture,
            aperture_scale: 1.0,
        })
    }

    /// Returns the surfaces.
    pub fn surfaces(&self) -> &[LensSurface] {
        &self.surfaces
    }

    /// Returns a surface.
    ///
    /// * `i` - Surface index.
    pub fn surface(&self, i: usize) -> &LensSurface {
        &self.surfaces[i]
    }

    /// Returns the number of surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns true if there are no surfaces. Never true for a constructed
    /// prescription.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Returns the index of the last surface.
    pub fn last(&self) -> usize {
        self.surfaces.len() - 1
    }

    /// Returns the media.
    pub fn media(&self) -> &[Medium] {
        &self.media
    }

    /// Returns the refractive index of a medium.
    ///
    /// * `medium`     - Medium index.
    /// * `wavelength` - Wavelength in micrometers.
    #[inline]
    pub fn index(&self, medium: usize, wavelength: Float) -> Float {
        self.media[medium].index(wavelength)
    }

    /// Returns the aperture stop index.
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Returns the imported stop aperture radius.
    pub fn stop_aperture(&self) -> Float {
        self.stop_aperture
    }

    /// Returns the current stop aperture scale.
    pub fn aperture_scale(&self) -> Float {
        self.aperture_scale
    }

    /// Scales the stop aperture relative to the imported value.
    ///
    /// * `scale` - Scale in [0, 1].
    pub fn set_aperture_scale(&mut self, scale: Float) -> Result<(), String> {
        if !(0.0..=1.0).contains(&scale) {
            return Err(format!("Aperture scale {} is outside [0, 1]", scale));
        }
        self.aperture_scale = scale;
        self.surfaces[self.stop].aperture = self.stop_aperture * scale;
        Ok(())
    }

    /// Returns the vertex of the first surface.
    pub fn front_vertex(&self) -> Float {
        self.surfaces[0].vertex
    }

    /// Returns the vertex of the last surface.
    pub fn rear_vertex(&self) -> Float {
        self.surfaces[self.last()].vertex
    }
}

/// Non fatal findings from importing a lens file.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// `UNIT` with an unknown identifier; the scale was left unchanged.
    UnknownUnit { line: usize, unit: String },

    /// A surface type other than `STANDARD`.
    UnsupportedSurfaceType { line: usize, kind: String },

    /// A command without its required field.
    MissingField { line: usize, command: String },

    /// A surface without aperture was merged into its neighbour.
    VirtualSurface { line: usize },

    /// A virtual surface named a glass that was dropped with it.
    IgnoredGlass { line: usize, glass: String },

    /// No `STOP` record; the first surface is used.
    MissingStop,
}

impl Diagnostic {
    /// Returns true if the diagnostic makes the prescription unsupported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedSurfaceType { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUnit { line, unit } => write!(f, "line {line}: unknown unit '{unit}'"),
            Self::UnsupportedSurfaceType { line, kind } => {
                write!(f, "line {line}: unsupported surface type '{kind}'")
            }
            Self::MissingField { line, command } => {
                write!(f, "line {line}: {command} is missing a value")
            }
            Self::VirtualSurface { line } => {
                write!(f, "line {line}: surface without aperture merged into previous surface")
            }
            Self::IgnoredGlass { line, glass } => {
                write!(f, "line {line}: glass '{glass}' on a virtual surface ignored")
            }
            Self::MissingStop => write!(f, "no STOP surface; using the first surface"),
        }
    }
}

/// The result of importing a lens file.
#[derive(Clone, Debug)]
pub struct Import {
    /// The prescription in meters.
    pub prescription: LensPrescription,

    /// Non fatal findings.
    pub diagnostics: Vec<Diagnostic>,
}

impl Import {
    /// Returns false if any surface could not be represented.
    pub fn is_supported(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.is_unsupported())
    }
}

/// Imports a Zemax sequential lens file.
///
/// * `path`    - Path to file.
/// * `catalog` - Glass catalog.
pub fn import_lens_file(path: &str, catalog: &GlassCatalog) -> Result<Import, String> {
    let records = parse_lens_file(path)?;
    let import = import_records(&records, catalog).map_err(|e| format!("{}: {}", path, e))?;
    info!(
        "Imported lens containing {} surfaces from file {}",
        import.prescription.len(),
        path
    );
    Ok(import)
}

/// Imports Zemax sequential lens file contents.
///
/// * `text`    - File contents.
/// * `catalog` - Glass catalog.
pub fn import_lens_str(text: &str, catalog: &GlassCatalog) -> Result<Import, String> {
    import_records(&parse_lens_str(text)?, catalog)
}

/// A surface as written in the file, before object/image removal.
#[derive(Clone, Debug, Default)]
struct RawSurface {
    line: usize,
    curvature: Option<Float>,
    thickness: Float,
    glass: Option<String>,
    flap: Option<Float>,
    diam: Option<Float>,
    stop: bool,
    scale: Float,
}

impl RawSurface {
    fn aperture(&self) -> Float {
        self.flap.or(self.diam).unwrap_or(0.0)
    }

    fn radius(&self) -> Float {
        let c = match self.curvature {
            Some(c) if c != 0.0 => c,
            _ => FLAT_CURVATURE,
        };
        self.scale / c
    }
}

/// Parses a numeric field of a record.
fn number(record: &Record, i: usize, diagnostics: &mut Vec<Diagnostic>) -> Result<Option<Float>, String> {
    match record.field(i) {
        Some(s) => s.parse::<Float>().map(Some).map_err(|_| {
            format!(
                "line {}: invalid number '{}' for {}",
                record.line, s, record.command
            )
        }),
        None => {
            diagnostics.push(Diagnostic::MissingField {
                line: record.line,
                command: record.command.clone(),
            });
            Ok(None)
        }
    }
}

/// Builds a prescription from parsed records.
///
/// * `records` - Parsed lens file records.
/// * `catalog` - Glass catalog.
pub fn import_records(records: &[Record], catalog: &GlassCatalog) -> Result<Import, String> {
    let mut diagnostics = vec![];
    let mut scale: Float = 1.0;
    let mut raw: Vec<RawSurface> = vec![];

    for record in records {
        let line = record.line;
        match record.command.as_str() {
            "UNIT" => match record.field(0) {
                Some("MM") => scale = 0.001,
                Some("CM") => scale = 0.01,
                Some("IN") => scale = 0.0254,
                Some("METER") | Some("M") => scale = 1.0,
                Some(unit) => diagnostics.push(Diagnostic::UnknownUnit {
                    line,
                    unit: unit.to_string(),
                }),
                None => diagnostics.push(Diagnostic::MissingField {
                    line,
                    command: record.command.clone(),
                }),
            },
            "SURF" => raw.push(RawSurface {
                line,
                scale,
                ..Default::default()
            }),
            _ => {
                // Records before the first SURF are ignored.
                let Some(surface) = raw.last_mut() else {
                    continue;
                };
                surface.scale = scale;
                match record.command.as_str() {
                    "TYPE" => match record.field(0) {
                        Some("STANDARD") => (),
                        Some(kind) => diagnostics.push(Diagnostic::UnsupportedSurfaceType {
                            line,
                            kind: kind.to_string(),
                        }),
                        None => (),
                    },
                    "CURV" => surface.curvature = number(record, 0, &mut diagnostics)?,
                    "DISZ" => {
                        surface.thickness = match record.field(0) {
                            Some(s) if s.eq_ignore_ascii_case("INFINITY") => 0.0,
                            _ => number(record, 0, &mut diagnostics)?
                                .map(|d| scale * d)
                                .filter(|d| d.is_finite() && *d <= MAX_THICKNESS)
                                .unwrap_or(0.0),
                        }
                    }
                    "GLAS" => surface.glass = record.field(0).map(|g| g.to_string()),
                    "FLAP" => surface.flap = number(record, 1, &mut diagnostics)?.map(|r| scale * r),
                    "DIAM" => surface.diam = number(record, 0, &mut diagnostics)?.map(|r| scale * r),
                    "STOP" => surface.stop = true,
                    _ => (), // Unknown commands are ignored.
                }
            }
        }
    }

    // Vertex positions include the object thickness.
    let mut vertices = Vec::with_capacity(raw.len());
    let mut z = 0.0;
    for s in raw.iter() {
        vertices.push(z);
        z += s.thickness;
    }

    // Drop the object and image surfaces.
    if raw.len() < 3 {
        return Err("Lens has no active surfaces".to_string());
    }
    let n = raw.len() - 1;

    let mut surfaces: Vec<LensSurface> = vec![];
    let mut media = vec![Medium::air()];
    let mut stop = None;
    for i in 1..n {
        let s = &raw[i];
        let aperture = s.aperture();
        if aperture <= VIRTUAL_APERTURE {
            if s.stop {
                return Err(format!("line {}: stop surface has no aperture", s.line));
            }
            diagnostics.push(Diagnostic::VirtualSurface { line: s.line });
            if let Some(glass) = &s.glass {
                if media.last().map_or(true, |m| !m.name.eq_ignore_ascii_case(glass)) {
                    diagnostics.push(Diagnostic::IgnoredGlass {
                        line: s.line,
                        glass: glass.clone(),
                    });
                }
            }
            continue;
        }

        if s.stop {
            stop = Some(surfaces.len());
        }
        let medium = match &s.glass {
            Some(glass) => catalog
                .medium(glass)
                .map_err(|e| format!("line {}: {}", s.line, e))?,
            None => Medium::air(),
        };
        surfaces.push(LensSurface::new(s.radius(), vertices[i], s.thickness, aperture));
        media.push(medium);
    }

    // Thickness spans any merged virtual surfaces.
    for i in 0..surfaces.len().saturating_sub(1) {
        surfaces[i].thickness = surfaces[i + 1].vertex - surfaces[i].vertex;
    }

    let stop = match stop {
        Some(stop) => stop,
        None => {
            diagnostics.push(Diagnostic::MissingStop);
            0
        }
    };

    for d in diagnostics.iter() {
        warn!("{}", d);
    }

    let prescription = LensPrescription::new(surfaces, media, stop)?;
    Ok(Import {
        prescription,
        diagnostics,
    })
}
