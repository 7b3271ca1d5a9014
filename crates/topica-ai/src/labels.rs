//! The fixed topic-label vocabulary the classifier predicts over.
//!
//! Nineteen labels with class indices 0..=18, closed at build time. Decoding
//! a raw class index is the only translation between model output and
//! user-facing text; indices outside the trained range decode to
//! [`TopicLabel::Unknown`] rather than failing.

use std::fmt;

/// Number of trained topic labels (class indices `0..TOPIC_COUNT`).
pub const TOPIC_COUNT: usize = 19;

/// A topic a civic-participation activity can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicLabel {
    GovernmentCivicEngagement,
    BudgetingFinancialPlanning,
    SocialCommunityIssues,
    EnvironmentalPolicies,
    HealthcarePublicServices,
    EducationStudentEngagement,
    SocialJusticeCommunityDevelopment,
    TechnologyDigitalGovernance,
    TransportationUrbanPlanning,
    ElectionsDemocraticProcesses,
    LaborRightsEconomicPolicies,
    HousingInfrastructure,
    PublicSafetyLawEnforcement,
    ArtsCultureMedia,
    ParticipatoryDeliberativeDemocracy,
    InternationalRelationsGeopolitics,
    PublicHealthPandemicPolicy,
    RuralDevelopmentAgriculture,
    EnergyRenewableResources,
    /// Sentinel for class indices outside the trained range.
    Unknown,
}

impl TopicLabel {
    /// The trained labels in class-index order. Excludes [`Self::Unknown`].
    pub const ALL: [TopicLabel; TOPIC_COUNT] = [
        TopicLabel::GovernmentCivicEngagement,
        TopicLabel::BudgetingFinancialPlanning,
        TopicLabel::SocialCommunityIssues,
        TopicLabel::EnvironmentalPolicies,
        TopicLabel::HealthcarePublicServices,
        TopicLabel::EducationStudentEngagement,
        TopicLabel::SocialJusticeCommunityDevelopment,
        TopicLabel::TechnologyDigitalGovernance,
        TopicLabel::TransportationUrbanPlanning,
        TopicLabel::ElectionsDemocraticProcesses,
        TopicLabel::LaborRightsEconomicPolicies,
        TopicLabel::HousingInfrastructure,
        TopicLabel::PublicSafetyLawEnforcement,
        TopicLabel::ArtsCultureMedia,
        TopicLabel::ParticipatoryDeliberativeDemocracy,
        TopicLabel::InternationalRelationsGeopolitics,
        TopicLabel::PublicHealthPandemicPolicy,
        TopicLabel::RuralDevelopmentAgriculture,
        TopicLabel::EnergyRenewableResources,
    ];

    /// Decode a raw class index from the model.
    ///
    /// Anything outside `0..TOPIC_COUNT` (including negative indices) maps to
    /// [`Self::Unknown`].
    pub fn from_index(index: i64) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
            .unwrap_or(Self::Unknown)
    }

    /// The class index of this label, `None` for [`Self::Unknown`].
    pub fn index(self) -> Option<usize> {
        Self::ALL.iter().position(|&l| l == self)
    }

    /// Look up a label by its exact display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|l| l.as_str() == name).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GovernmentCivicEngagement => "Government & Civic Engagement",
            Self::BudgetingFinancialPlanning => "Budgeting & Financial Planning",
            Self::SocialCommunityIssues => "Social & Community Issues",
            Self::EnvironmentalPolicies => "Environmental Policies",
            Self::HealthcarePublicServices => "Healthcare & Public Services",
            Self::EducationStudentEngagement => "Education & Student Engagement",
            Self::SocialJusticeCommunityDevelopment => {
                "Social Justice & Community Development"
            }
            Self::TechnologyDigitalGovernance => "Technology & Digital Governance",
            Self::TransportationUrbanPlanning => "Transportation & Urban Planning",
            Self::ElectionsDemocraticProcesses => "Elections & Democratic Processes",
            Self::LaborRightsEconomicPolicies => "Labor Rights & Economic Policies",
            Self::HousingInfrastructure => "Housing & Infrastructure",
            Self::PublicSafetyLawEnforcement => "Public Safety & Law Enforcement",
            Self::ArtsCultureMedia => "Arts, Culture & Media",
            Self::ParticipatoryDeliberativeDemocracy => {
                "Participatory & Deliberative Democracy"
            }
            Self::InternationalRelationsGeopolitics => {
                "International Relations & Geopolitics"
            }
            Self::PublicHealthPandemicPolicy => "Public Health & Pandemic Policy",
            Self::RuralDevelopmentAgriculture => "Rural Development & Agriculture",
            Self::EnergyRenewableResources => "Energy & Renewable Resources",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
