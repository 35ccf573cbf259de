//! Cross-section properties for frame elements.

use serde::{Deserialize, Serialize};

/// Cross-section properties, referencing a material by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSection {
    pub id: String,
    pub material_id: String,
    /// Cross-sectional area, m².
    pub a: f64,
    /// Moment of inertia about the element's local y-axis, m⁴.
    pub iy: f64,
    /// Moment of inertia about the element's local z-axis, m⁴.
    pub iz: f64,
    /// Torsional constant, m⁴.
    pub j: f64,
    pub depth: Option<f64>,
    pub width: Option<f64>,
}

impl FrameSection {
    pub fn new(
        id: impl Into<String>,
        material_id: impl Into<String>,
        a: f64,
        iy: f64,
        iz: f64,
        j: f64,
    ) -> Self {
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy,
            iz,
            j,
            depth: None,
            width: None,
        }
    }

    /// Rectangular section, width × depth.
    pub fn rectangular(id: impl Into<String>, material_id: impl Into<String>, width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iy = width * depth.powi(3) / 12.0;
        let iz = depth * width.powi(3) / 12.0;
        let (a_dim, b_dim) = if width > depth { (width, depth) } else { (depth, width) };
        let j = a_dim * b_dim.powi(3) / 3.0 * (1.0 - 0.63 * b_dim / a_dim);
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy,
            iz,
            j,
            depth: Some(depth),
            width: Some(width),
        }
    }

    /// Solid circular section of the given diameter.
    pub fn circular(id: impl Into<String>, material_id: impl Into<String>, diameter: f64) -> Self {
        let r = diameter / 2.0;
        let a = std::f64::consts::PI * r.powi(2);
        let i = std::f64::consts::PI * r.powi(4) / 4.0;
        let j = std::f64::consts::PI * r.powi(4) / 2.0;
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy: i,
            iz: i,
            j,
            depth: Some(diameter),
            width: Some(diameter),
        }
    }

    /// Hollow circular (pipe) section.
    pub fn pipe(
        id: impl Into<String>,
        material_id: impl Into<String>,
        outer_diameter: f64,
        wall_thickness: f64,
    ) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;
        let a = std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2));
        let i = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;
        let j = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 2.0;
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy: i,
            iz: i,
            j,
            depth: Some(outer_diameter),
            width: Some(outer_diameter),
        }
    }

    /// Wide-flange (I-beam) section.
    pub fn wide_flange(
        id: impl Into<String>,
        material_id: impl Into<String>,
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        let bf = flange_width;
        let tf = flange_thickness;
        let tw = web_thickness;
        let d = depth;
        let hw = d - 2.0 * tf;
        let a = 2.0 * bf * tf + hw * tw;
        let iy = (bf * d.powi(3) - (bf - tw) * hw.powi(3)) / 12.0;
        let iz = (2.0 * tf * bf.powi(3) + hw * tw.powi(3)) / 12.0;
        let j = (2.0 * bf * tf.powi(3) + hw * tw.powi(3)) / 3.0;
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy,
            iz,
            j,
            depth: Some(d),
            width: Some(bf),
        }
    }

    /// Rectangular box/tube section.
    pub fn box_section(
        id: impl Into<String>,
        material_id: impl Into<String>,
        width: f64,
        depth: f64,
        wall_thickness: f64,
    ) -> Self {
        let t = wall_thickness;
        let b = width;
        let d = depth;
        let bi = b - 2.0 * t;
        let di = d - 2.0 * t;
        let a = b * d - bi * di;
        let iy = (b * d.powi(3) - bi * di.powi(3)) / 12.0;
        let iz = (d * b.powi(3) - di * bi.powi(3)) / 12.0;
        let am = (b - t) * (d - t);
        let s = 2.0 * (b + d) - 4.0 * t;
        let j = 4.0 * am.powi(2) * t / s;
        Self {
            id: id.into(),
            material_id: material_id.into(),
            a,
            iy,
            iz,
            j,
            depth: Some(d),
            width: Some(b),
        }
    }
}
