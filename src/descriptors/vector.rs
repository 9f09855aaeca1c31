use serde::{Deserialize, Serialize};

/// Number of shape/size features per blob.
pub const DESCRIPTOR_LEN: usize = 10;

/// Column names of descriptor tables, in feature order.
pub const FEATURE_COLUMNS: [&str; DESCRIPTOR_LEN] = [
    "AREA_M",
    "AREA_BB_M",
    "PERIMETRO_M",
    "PERIMETRO_BB_M",
    "COMPACIDAD",
    "EXCENTRICIDAD",
    "RELACION_ASPECTO_BB",
    "EXTENT",
    "CONVEXIDAD",
    "SOLIDEZ",
];

/// Target column of labeled tables.
pub const TARGET_COLUMN: &str = "CANTIDAD_PLANTAS";

/// Fixed-order feature vector of one blob.
///
/// Dimensional features are expressed in meters (m, m²) using the ground
/// scale; the remaining ones are dimensionless ratios.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorVector(pub [f64; DESCRIPTOR_LEN]);

impl DescriptorVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn area_m(&self) -> f64 {
        self.0[0]
    }
    pub fn bbox_area_m(&self) -> f64 {
        self.0[1]
    }
    pub fn perimeter_m(&self) -> f64 {
        self.0[2]
    }
    pub fn bbox_perimeter_m(&self) -> f64 {
        self.0[3]
    }
    pub fn compactness(&self) -> f64 {
        self.0[4]
    }
    pub fn eccentricity(&self) -> f64 {
        self.0[5]
    }
    pub fn aspect_ratio(&self) -> f64 {
        self.0[6]
    }
    pub fn extent(&self) -> f64 {
        self.0[7]
    }
    pub fn convexity(&self) -> f64 {
        self.0[8]
    }
    pub fn solidity(&self) -> f64 {
        self.0[9]
    }
}

impl TryFrom<&[f64]> for DescriptorVector {
    type Error = crate::Error;

    fn try_from(values: &[f64]) -> crate::Result<Self> {
        let arr: [f64; DESCRIPTOR_LEN] =
            values
                .try_into()
                .map_err(|_| crate::Error::ModelMismatch {
                    expected: DESCRIPTOR_LEN,
                    actual: values.len(),
                })?;
        Ok(Self(arr))
    }
}

/// Descriptor vector with its ground-truth plant count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub descriptors: DescriptorVector,
    pub plant_count: u32,
}
