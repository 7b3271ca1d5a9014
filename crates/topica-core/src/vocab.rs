//! Closed categorical vocabularies for participation records.
//!
//! Each field the classifier was trained on has a fixed value set. Values are
//! enums rather than free strings so that out-of-vocabulary input is rejected
//! at the boundary instead of being passed through to the model. Every
//! vocabulary exposes its display text (exactly as the training data spelled
//! it) and a stable integer code (the value's position in the vocabulary).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A closed-vocabulary field received a value outside its vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} value {value:?}, expected one of: {}", .expected.join(", "))]
pub struct OutOfVocabulary {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

macro_rules! closed_vocab {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every value in the vocabulary, in code order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Display strings, aligned with [`Self::ALL`].
            pub const NAMES: &'static [&'static str] = &[$($text,)+];

            /// The vocabulary text for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Stable integer code: the value's position in the vocabulary.
            pub fn code(self) -> i64 {
                self as i64
            }
        }

        impl FromStr for $name {
            type Err = OutOfVocabulary;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .find(|v| v.as_str() == s)
                    .copied()
                    .ok_or_else(|| OutOfVocabulary {
                        field: $field,
                        value: s.to_string(),
                        expected: Self::NAMES,
                    })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_vocab! {
    /// Public-participation method used by the activity.
    PpMethod, "PPMethods" {
        ParticipatoryBudgeting => "Participatory Budgeting",
        Surveys => "Surveys",
        Protest => "Protest",
        OnlineConsultations => "Online Consultations",
        PublicHearing => "Public Hearing",
        Petition => "Petition",
        Other => "Other",
        Unknown => "Unknown",
    }
}

closed_vocab! {
    /// Audience the activity was aimed at.
    TargetAudience, "TargetedAudience" {
        GeneralPublic => "General Public",
        ElectedOfficials => "Elected Officials",
        AppointedPublicServants => "Appointed Public Servants",
        OrganizedGroups => "Organized Groups",
        Media => "Media",
        Other => "Other",
        Unknown => "Unknown",
    }
}

closed_vocab! {
    /// Geographic scope of the activity.
    GeogScope, "GeogScope" {
        Local => "Local",
        Regional => "Regional",
        National => "National",
        International => "International",
    }
}

closed_vocab! {
    /// Declared purpose of the activity.
    Purpose, "Purpose" {
        Consulting => "Consulting",
        PublicDecision => "Public Decision",
        DevelopIndividualCapacity => "Develop Individual Capacity",
        RaisePublicAwareness => "Raise Public Awareness",
        CommunityBuilding => "Community Building",
        Protest => "Protest",
        CoGovernance => "Co-Governance",
        Other => "Other",
        None => "None",
    }
}

closed_vocab! {
    /// Broad subject category assigned by the source.
    Category, "Category" {
        SocialIssues => "Social Issues",
        GovernanceLaw => "Governance & Law",
        EconomicFinancialIssues => "Economic & Financial Issues",
        CommunityEnvironment => "Community & Environment",
        EducationKnowledge => "Education & Knowledge",
        ArtsCultureMedia => "Arts, Culture & Media",
        MiscellaneousOther => "Miscellaneous / Other",
        None => "None",
    }
}

closed_vocab! {
    /// How the activity was facilitated.
    FacilitationType, "FacilitationType" {
        Professional => "Professional",
        Peer => "Peer",
        NoFacilitation => "No Facilitation",
        Other => "Other",
        Unknown => "Unknown",
    }
}

/// Record completeness grade, 1..=3.
///
/// Not an enum like the other fields, but still a closed vocabulary: the
/// training data only ever contains the three grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Completeness(u8);

impl Completeness {
    pub const NAMES: &'static [&'static str] = &["1", "2", "3"];

    pub fn new(grade: u8) -> Result<Self, OutOfVocabulary> {
        if (1..=3).contains(&grade) {
            Ok(Self(grade))
        } else {
            Err(OutOfVocabulary {
                field: "Completeness",
                value: grade.to_string(),
                expected: Self::NAMES,
            })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn code(self) -> i64 {
        i64::from(self.0)
    }
}

impl FromStr for Completeness {
    type Err = OutOfVocabulary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let grade = s.parse::<u8>().map_err(|_| OutOfVocabulary {
            field: "Completeness",
            value: s.to_string(),
            expected: Self::NAMES,
        })?;
        Self::new(grade)
    }
}

impl fmt::Display for Completeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
