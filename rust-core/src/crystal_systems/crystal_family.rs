use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};
use serde::{Deserialize, Serialize};

/// The seven crystal families, ordered by increasing symmetry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FamilyType {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Trigonal,
    Hexagonal,
    Cubic,
}

/// Setting variations. Most families only know `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variation {
    None,
    UniqueAxisA,
    UniqueAxisB,
    UniqueAxisC,
    HexagonalAxes,
    RhombohedralAxes,
}

/// Lookup key of a family: (family type, variation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CrystalFamilyIdentification {
    pub family_type: FamilyType,
    pub variation: Variation,
}

impl CrystalFamilyIdentification {
    pub fn new(family_type: FamilyType, variation: Variation) -> Self {
        Self {
            family_type,
            variation,
        }
    }
}

/// Unique axis of a monoclinic cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UniqueAxis {
    A,
    B,
    C,
}

/// Axis setting of a trigonal cell
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrigonalAxes {
    Hexagonal,
    Rhombohedral,
}

/// Closed set of crystal families together with the settings that change their rules.
///
/// Every (family, variation) pair that has its own metric rules is one variant here, so
/// the rule tables in `constraint_family` are matched exhaustively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CrystalFamily {
    Triclinic,
    Monoclinic(UniqueAxis),
    Orthorhombic,
    Tetragonal,
    Trigonal(TrigonalAxes),
    Hexagonal,
    Cubic,
}

impl CrystalFamily {
    /// Every distinct family setting
    pub const ALL: [CrystalFamily; 10] = [
        CrystalFamily::Triclinic,
        CrystalFamily::Monoclinic(UniqueAxis::A),
        CrystalFamily::Monoclinic(UniqueAxis::B),
        CrystalFamily::Monoclinic(UniqueAxis::C),
        CrystalFamily::Orthorhombic,
        CrystalFamily::Tetragonal,
        CrystalFamily::Trigonal(TrigonalAxes::Hexagonal),
        CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral),
        CrystalFamily::Hexagonal,
        CrystalFamily::Cubic,
    ];

    /// Resolve an identification. Trigonal without a variation means hexagonal axes.
    pub fn from_identification(identification: CrystalFamilyIdentification) -> Result<Self, Error> {
        use FamilyType as F;
        use Variation as V;

        let family = match (identification.family_type, identification.variation) {
            (F::Triclinic, V::None) => CrystalFamily::Triclinic,
            (F::Monoclinic, V::UniqueAxisA) => CrystalFamily::Monoclinic(UniqueAxis::A),
            (F::Monoclinic, V::UniqueAxisB) => CrystalFamily::Monoclinic(UniqueAxis::B),
            (F::Monoclinic, V::UniqueAxisC) => CrystalFamily::Monoclinic(UniqueAxis::C),
            (F::Orthorhombic, V::None) => CrystalFamily::Orthorhombic,
            (F::Tetragonal, V::None) => CrystalFamily::Tetragonal,
            (F::Trigonal, V::None | V::HexagonalAxes) => CrystalFamily::Trigonal(TrigonalAxes::Hexagonal),
            (F::Trigonal, V::RhombohedralAxes) => CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral),
            (F::Hexagonal, V::None) => CrystalFamily::Hexagonal,
            (F::Cubic, V::None) => CrystalFamily::Cubic,
            (family_type, variation) => {
                bail!("No crystal family is defined for {:?} with variation {:?}", family_type, variation)
            }
        };
        Ok(family)
    }

    pub fn identification(&self) -> CrystalFamilyIdentification {
        let (family_type, variation) = match self {
            CrystalFamily::Triclinic => (FamilyType::Triclinic, Variation::None),
            CrystalFamily::Monoclinic(UniqueAxis::A) => (FamilyType::Monoclinic, Variation::UniqueAxisA),
            CrystalFamily::Monoclinic(UniqueAxis::B) => (FamilyType::Monoclinic, Variation::UniqueAxisB),
            CrystalFamily::Monoclinic(UniqueAxis::C) => (FamilyType::Monoclinic, Variation::UniqueAxisC),
            CrystalFamily::Orthorhombic => (FamilyType::Orthorhombic, Variation::None),
            CrystalFamily::Tetragonal => (FamilyType::Tetragonal, Variation::None),
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) => (FamilyType::Trigonal, Variation::HexagonalAxes),
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) => {
                (FamilyType::Trigonal, Variation::RhombohedralAxes)
            }
            CrystalFamily::Hexagonal => (FamilyType::Hexagonal, Variation::None),
            CrystalFamily::Cubic => (FamilyType::Cubic, Variation::None),
        };
        CrystalFamilyIdentification::new(family_type, variation)
    }

    pub fn family_type(&self) -> FamilyType {
        self.identification().family_type
    }

    pub fn name(&self) -> &'static str {
        match self.family_type() {
            FamilyType::Triclinic => "Triclinic",
            FamilyType::Monoclinic => "Monoclinic",
            FamilyType::Orthorhombic => "Orthorhombic",
            FamilyType::Tetragonal => "Tetragonal",
            FamilyType::Trigonal => "Trigonal",
            FamilyType::Hexagonal => "Hexagonal",
            FamilyType::Cubic => "Cubic",
        }
    }
}

impl TryFrom<CrystalFamilyIdentification> for CrystalFamily {
    type Error = Error;

    fn try_from(identification: CrystalFamilyIdentification) -> Result<Self, Self::Error> {
        Self::from_identification(identification)
    }
}

impl fmt::Display for CrystalFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrystalFamily::Monoclinic(axis) => write!(f, "Monoclinic (unique axis {:?})", axis),
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) => write!(f, "Trigonal (hexagonal axes)"),
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) => write!(f, "Trigonal (rhombohedral axes)"),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for FamilyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let family_type = match s.trim().to_ascii_lowercase().as_str() {
            "triclinic" => FamilyType::Triclinic,
            "monoclinic" => FamilyType::Monoclinic,
            "orthorhombic" => FamilyType::Orthorhombic,
            "tetragonal" => FamilyType::Tetragonal,
            "trigonal" => FamilyType::Trigonal,
            "hexagonal" => FamilyType::Hexagonal,
            "cubic" => FamilyType::Cubic,
            other => bail!("Unknown crystal family '{}'", other),
        };
        Ok(family_type)
    }
}

impl FromStr for Variation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let variation = match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Variation::None,
            "a" | "unique-a" | "unique_axis_a" => Variation::UniqueAxisA,
            "b" | "unique-b" | "unique_axis_b" => Variation::UniqueAxisB,
            "c" | "unique-c" | "unique_axis_c" => Variation::UniqueAxisC,
            "h" | "hexagonal" | "hexagonal-axes" => Variation::HexagonalAxes,
            "r" | "rhombohedral" | "rhombohedral-axes" => Variation::RhombohedralAxes,
            other => bail!("Unknown crystal family variation '{}'", other),
        };
        Ok(variation)
    }
}

/// Classification of a space group as delivered by the space-group service:
/// its International Tables number and the setting variation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SpaceGroupClassification {
    pub number: u16,
    pub variation: Variation,
}

impl SpaceGroupClassification {
    pub fn new(number: u16, variation: Variation) -> Self {
        Self { number, variation }
    }

    /// Family type from the International Tables number ranges
    pub fn family_type(&self) -> Result<FamilyType, Error> {
        let family_type = match self.number {
            1..=2 => FamilyType::Triclinic,
            3..=15 => FamilyType::Monoclinic,
            16..=74 => FamilyType::Orthorhombic,
            75..=142 => FamilyType::Tetragonal,
            143..=167 => FamilyType::Trigonal,
            168..=194 => FamilyType::Hexagonal,
            195..=230 => FamilyType::Cubic,
            number => bail!("Space group number {} is outside 1..=230", number),
        };
        Ok(family_type)
    }

    /// Family setting of the group. Monoclinic groups without an axis choice use unique axis b.
    pub fn crystal_family(&self) -> Result<CrystalFamily, Error> {
        let family_type = self.family_type()?;
        let variation = match (family_type, self.variation) {
            (FamilyType::Monoclinic, Variation::None) => Variation::UniqueAxisB,
            (FamilyType::Monoclinic | FamilyType::Trigonal, variation) => variation,
            // Origin choices and similar settings do not change the metric rules
            _ => Variation::None,
        };
        CrystalFamily::from_identification(CrystalFamilyIdentification::new(family_type, variation))
    }
}
