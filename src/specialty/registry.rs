// Static specialty → keyword associations.
//
// Declaration order matters: it is the tie-break order used when two
// specialties end a request with the same score. Everything here is
// compiled in and never mutated, so a single registry can be shared by
// every request without coordination.

use std::fmt;

use serde::{Serialize, Serializer};

/// One of the fixed recommendation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specialty {
    Cardiologist,
    Dermatologist,
    Neurologist,
    Orthopedist,
    Gastroenterologist,
    Psychiatrist,
    Ent,
    Ophthalmologist,
    GeneralPhysician,
}

impl Specialty {
    /// Number of registered specialties.
    pub const COUNT: usize = 9;

    /// Every specialty, in registry declaration order.
    pub const ALL: [Specialty; Specialty::COUNT] = [
        Specialty::Cardiologist,
        Specialty::Dermatologist,
        Specialty::Neurologist,
        Specialty::Orthopedist,
        Specialty::Gastroenterologist,
        Specialty::Psychiatrist,
        Specialty::Ent,
        Specialty::Ophthalmologist,
        Specialty::GeneralPhysician,
    ];

    /// The specialty returned when nothing scores high enough.
    pub const FALLBACK: Specialty = Specialty::GeneralPhysician;

    /// Human-readable label, as returned to callers.
    pub fn name(self) -> &'static str {
        match self {
            Specialty::Cardiologist => "Cardiologist",
            Specialty::Dermatologist => "Dermatologist",
            Specialty::Neurologist => "Neurologist",
            Specialty::Orthopedist => "Orthopedist",
            Specialty::Gastroenterologist => "Gastroenterologist",
            Specialty::Psychiatrist => "Psychiatrist",
            Specialty::Ent => "ENT",
            Specialty::Ophthalmologist => "Ophthalmologist",
            Specialty::GeneralPhysician => "General Physician",
        }
    }

    /// Position in declaration order. Used to index per-specialty tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a specialty by its label (case-insensitive).
    pub fn from_name(name: &str) -> Option<Specialty> {
        Specialty::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Specialty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A specialty together with the keywords that point to it.
#[derive(Debug, Clone, Copy)]
pub struct SpecialtyProfile {
    pub specialty: Specialty,
    /// Lower-case words or short phrases. Never empty.
    pub keywords: &'static [&'static str],
}

const PROFILES: [SpecialtyProfile; Specialty::COUNT] = [
    SpecialtyProfile {
        specialty: Specialty::Cardiologist,
        keywords: &["heart", "chest pain", "palpitations", "blood pressure", "cardiovascular"],
    },
    SpecialtyProfile {
        specialty: Specialty::Dermatologist,
        keywords: &["skin", "rash", "acne", "itching", "dermal"],
    },
    SpecialtyProfile {
        specialty: Specialty::Neurologist,
        keywords: &["headache", "migraine", "seizure", "brain", "nervous system"],
    },
    SpecialtyProfile {
        specialty: Specialty::Orthopedist,
        keywords: &["bone", "joint", "fracture", "spine", "muscle pain"],
    },
    SpecialtyProfile {
        specialty: Specialty::Gastroenterologist,
        keywords: &["stomach", "digestive", "abdomen", "liver", "intestine"],
    },
    SpecialtyProfile {
        specialty: Specialty::Psychiatrist,
        keywords: &["depression", "anxiety", "mental health", "mood", "psychological"],
    },
    SpecialtyProfile {
        specialty: Specialty::Ent,
        keywords: &["ear", "nose", "throat", "hearing", "sinus"],
    },
    SpecialtyProfile {
        specialty: Specialty::Ophthalmologist,
        keywords: &["eye", "vision", "sight", "blindness", "optical"],
    },
    SpecialtyProfile {
        specialty: Specialty::GeneralPhysician,
        keywords: &["fever", "fatigue", "weakness", "general health", "unknown"],
    },
];

/// Immutable registry of specialty profiles.
///
/// There are no mutation operations; `SpecialtyRegistry::default()` always
/// yields the same nine profiles in the same order.
#[derive(Debug, Clone, Copy)]
pub struct SpecialtyRegistry {
    profiles: &'static [SpecialtyProfile],
}

impl Default for SpecialtyRegistry {
    fn default() -> Self {
        Self {
            profiles: &PROFILES,
        }
    }
}

impl SpecialtyRegistry {
    /// All profiles in declaration order.
    pub fn all_specialties(&self) -> &'static [SpecialtyProfile] {
        self.profiles
    }

    /// Keywords associated with a specialty.
    pub fn keywords_for(&self, specialty: Specialty) -> &'static [&'static str] {
        self.profiles
            .iter()
            .find(|p| p.specialty == specialty)
            .map(|p| p.keywords)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
