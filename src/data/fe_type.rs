//! Finite-element type descriptors.
//!
//! A field variable carries an interpolation family and order. The transfer
//! engine never evaluates basis functions; it only compares these descriptors
//! for equality, because identical FE types on both sides are what guarantee
//! that per-object DOF addressing coincides.

use std::fmt;

/// Interpolation family of a field variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FeFamily {
    /// Nodal Lagrange basis.
    Lagrange,
    /// Element-interior monomial basis.
    Monomial,
    /// Hermite basis with derivative DOFs.
    Hermite,
    /// Hierarchic (p-refinable) basis.
    Hierarchic,
}

impl fmt::Display for FeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeFamily::Lagrange => write!(f, "LAGRANGE"),
            FeFamily::Monomial => write!(f, "MONOMIAL"),
            FeFamily::Hermite => write!(f, "HERMITE"),
            FeFamily::Hierarchic => write!(f, "HIERARCHIC"),
        }
    }
}

/// Interpolation order of a field variable.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum FeOrder {
    /// Piecewise constant.
    Constant,
    /// Linear.
    First,
    /// Quadratic.
    Second,
    /// Cubic.
    Third,
}

impl fmt::Display for FeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeOrder::Constant => write!(f, "CONSTANT"),
            FeOrder::First => write!(f, "FIRST"),
            FeOrder::Second => write!(f, "SECOND"),
            FeOrder::Third => write!(f, "THIRD"),
        }
    }
}

/// Full finite-element descriptor: order plus family.
///
/// Two field variables are type-compatible for a direct DOF transfer only if
/// their `FeType`s are equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FeType {
    /// Interpolation family.
    pub family: FeFamily,
    /// Interpolation order.
    pub order: FeOrder,
}

impl FeType {
    /// A descriptor with the given family and order.
    #[inline]
    pub const fn new(family: FeFamily, order: FeOrder) -> Self {
        FeType { family, order }
    }

    /// Linear nodal Lagrange, the common nodal-field default.
    #[inline]
    pub const fn lagrange_first() -> Self {
        FeType::new(FeFamily::Lagrange, FeOrder::First)
    }

    /// Constant monomial, the common elemental-field default.
    #[inline]
    pub const fn constant_monomial() -> Self {
        FeType::new(FeFamily::Monomial, FeOrder::Constant)
    }
}

impl fmt::Display for FeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.order, self.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_order_then_family() {
        assert_eq!(FeType::lagrange_first().to_string(), "FIRST LAGRANGE");
        assert_eq!(
            FeType::constant_monomial().to_string(),
            "CONSTANT MONOMIAL"
        );
    }

    #[test]
    fn equality_is_componentwise() {
        assert_eq!(FeType::lagrange_first(), FeType::lagrange_first());
        assert_ne!(
            FeType::lagrange_first(),
            FeType::new(FeFamily::Lagrange, FeOrder::Second)
        );
        assert_ne!(
            FeType::lagrange_first(),
            FeType::new(FeFamily::Hierarchic, FeOrder::First)
        );
    }

    #[test]
    fn serde_roundtrip() {
        let t = FeType::new(FeFamily::Hermite, FeOrder::Third);
        let s = serde_json::to_string(&t).unwrap();
        let t2: FeType = serde_json::from_str(&s).unwrap();
        assert_eq!(t2, t);
    }
}
