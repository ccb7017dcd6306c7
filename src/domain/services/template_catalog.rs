//! Template catalog - read-only table of challenge templates per theme

use std::collections::HashMap;

use crate::domain::entities::SkillSynergy;
use crate::domain::value_objects::ChallengeTheme;

/// Catalog or configuration bug found while generating a challenge.
///
/// These abort generation: they say nothing about player input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("No template registered for theme '{0}'")]
    MissingTemplate(ChallengeTheme),
    #[error("Template for theme '{0}' yields no skill options")]
    EmptySkillList(ChallengeTheme),
}

/// Bidirectional skill affinities and the DC discount they grant
const SKILL_AFFINITIES: &[(&str, &str, i32)] = &[
    ("Insight", "Persuasion", 2),
    ("Perception", "Investigation", 2),
    ("Stealth", "Sleight of Hand", 2),
    ("Arcana", "Religion", 2),
    ("Athletics", "Acrobatics", 2),
    ("Survival", "Nature", 2),
    ("Deception", "Performance", 2),
    ("History", "Arcana", 3),
    ("Medicine", "Nature", 2),
    ("Intimidation", "Athletics", 2),
];

/// Synergy links for `skill` taken from the affinity table, in table order
pub fn affinities_for(skill: &str) -> Vec<SkillSynergy> {
    SKILL_AFFINITIES
        .iter()
        .filter_map(|(a, b, bonus)| {
            if a.eq_ignore_ascii_case(skill) {
                Some(SkillSynergy::new(*b).with_bonus(*bonus))
            } else if b.eq_ignore_ascii_case(skill) {
                Some(SkillSynergy::new(*a).with_bonus(*bonus))
            } else {
                None
            }
        })
        .collect()
}

/// Environmental twist a template contributes to its dynamic elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentalTwist {
    pub name: String,
    pub condition: String,
    pub effect: String,
}

#[derive(Debug, Clone)]
pub struct ChallengeTemplate {
    pub theme: ChallengeTheme,
    pub base_successes: u32,
    pub base_failures: u32,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
    /// Cosmetic names, one picked per generated challenge
    pub names: Vec<String>,
    /// Cosmetic descriptions, one picked per generated challenge
    pub descriptions: Vec<String>,
    pub twist: EnvironmentalTwist,
}

impl ChallengeTemplate {
    fn build(
        theme: ChallengeTheme,
        base: (u32, u32),
        primary: &[&str],
        secondary: &[&str],
        names: &[&str],
        descriptions: &[&str],
        twist: (&str, &str, &str),
    ) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            theme,
            base_successes: base.0,
            base_failures: base.1,
            primary_skills: owned(primary),
            secondary_skills: owned(secondary),
            names: owned(names),
            descriptions: owned(descriptions),
            twist: EnvironmentalTwist {
                name: twist.0.to_string(),
                condition: twist.1.to_string(),
                effect: twist.2.to_string(),
            },
        }
    }

    /// The standard record for a theme. Every theme has exactly one arm.
    pub fn standard(theme: ChallengeTheme) -> Self {
        match theme {
            ChallengeTheme::Infiltration => Self::build(
                theme,
                (4, 3),
                &["Stealth", "Deception", "Sleight of Hand", "Perception"],
                &["Athletics", "Insight"],
                &["The Silent Entry", "Behind Enemy Walls", "Shadows of the Keep"],
                &[
                    "The party must slip past watchful guards and locked doors without raising the alarm.",
                    "A guarded compound stands between the party and their goal. Every misstep risks discovery.",
                ],
                ("Changing of the Guard", "The patrol rotates mid-infiltration", "Fresh guards sweep the halls"),
            ),
            ChallengeTheme::Negotiation => Self::build(
                theme,
                (5, 3),
                &["Persuasion", "Insight", "Deception", "Intimidation"],
                &["History", "Performance"],
                &["The Parley", "Terms of Accord", "A Seat at the Table"],
                &[
                    "Tempers run high as rival parties gather. Words are the only weapons allowed here.",
                    "The party must win over a wary counterpart before the talks collapse.",
                ],
                ("Unexpected Envoy", "A third party arrives at the talks", "New demands reshape the negotiation"),
            ),
            ChallengeTheme::Exploration => Self::build(
                theme,
                (5, 3),
                &["Survival", "Perception", "Athletics", "Nature"],
                &["Investigation", "Acrobatics"],
                &["Into the Uncharted", "The Lost Passage", "Beyond the Map's Edge"],
                &[
                    "Unmapped terrain hides both hazards and wonders. The party must find a safe way through.",
                    "Old trails vanish into wilderness. Only careful navigation will bring the party through.",
                ],
                ("Collapsing Ground", "The terrain shifts underfoot", "The obvious route is lost"),
            ),
            ChallengeTheme::Chase => Self::build(
                theme,
                (4, 3),
                &["Athletics", "Acrobatics", "Perception", "Stealth"],
                &["Survival", "Intimidation"],
                &["Rooftop Pursuit", "Run Them Down", "The Narrow Escape"],
                &[
                    "The quarry bolts through crowded streets. Lose sight of them and they are gone for good.",
                    "Hunters close in from every side. The party must outrun them before the net tightens.",
                ],
                ("Crowded Market", "The chase plunges into a busy square", "Bystanders block the way"),
            ),
            ChallengeTheme::Investigation => Self::build(
                theme,
                (5, 2),
                &["Investigation", "Insight", "Perception", "History"],
                &["Arcana", "Persuasion"],
                &["The Cold Trail", "Threads of Truth", "What the Walls Remember"],
                &[
                    "Clues lie scattered and witnesses are reluctant. The truth will not wait for long.",
                    "A mystery unravels one detail at a time. Miss too much and the culprit walks free.",
                ],
                ("Evidence Tampering", "Someone disturbs the scene", "A key clue is lost"),
            ),
            ChallengeTheme::MagicalRitual => Self::build(
                theme,
                (6, 2),
                &["Arcana", "Religion", "Insight", "Nature"],
                &["History", "Medicine"],
                &["The Binding Circle", "Rite of the Veil", "Words of Unmaking"],
                &[
                    "Ancient power gathers in the circle. Every word and gesture must be precise.",
                    "The ritual demands focus from everyone present. A single slip could unleash what it binds.",
                ],
                ("Wild Surge", "Raw magic flares from the circle", "Unpredictable energy lashes the participants"),
            ),
            ChallengeTheme::Survival => Self::build(
                theme,
                (5, 3),
                &["Survival", "Nature", "Medicine", "Athletics"],
                &["Perception", "Animal Handling"],
                &["Against the Elements", "The Long Night", "Winter's Teeth"],
                &[
                    "Supplies run low and the weather turns cruel. The party must endure until help arrives.",
                    "The wilds test every traveler. Shelter, food and warmth are all that matter now.",
                ],
                ("Sudden Storm", "The weather worsens without warning", "Exposure threatens everyone"),
            ),
        }
    }
}

/// Immutable lookup from theme to template record
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: HashMap<ChallengeTheme, ChallengeTemplate>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateCatalog {
    /// Catalog with the standard record for every theme
    pub fn standard() -> Self {
        Self::from_templates(ChallengeTheme::ALL.into_iter().map(ChallengeTemplate::standard))
    }

    /// Catalog from custom records; a later record replaces an earlier one
    pub fn from_templates(templates: impl IntoIterator<Item = ChallengeTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.theme, t)).collect(),
        }
    }

    pub fn get(&self, theme: ChallengeTheme) -> Result<&ChallengeTemplate, CatalogError> {
        self.templates
            .get(&theme)
            .ok_or(CatalogError::MissingTemplate(theme))
    }

    /// Registered templates in theme declaration order
    pub fn templates(&self) -> impl Iterator<Item = &ChallengeTemplate> {
        ChallengeTheme::ALL
            .iter()
            .filter_map(move |theme| self.templates.get(theme))
    }
}
