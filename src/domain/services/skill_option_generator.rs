//! Skill option generator - primary, secondary and creative approaches

use crate::domain::entities::{AppliedScaling, SkillCategory, SkillOption, CREATIVE_APPROACH};
use crate::domain::services::{affinities_for, CatalogError, ChallengeTemplate};
use crate::domain::value_objects::{DifficultyTier, MAX_SOLUTIONS};

/// DC jitter cycled over primary options so they don't all read the same
const PRIMARY_JITTER: [i32; 4] = [0, 1, -1, 2];

/// Attempts allowed on secondary and creative options
const LIMITED_USES: u32 = 2;

/// Names for synthesized creative options, used in order when gaps need filling
const IMPROVISED_APPROACHES: &[&str] = &[
    "Improvised Tools",
    "Environmental Advantage",
    "Teamwork Gambit",
    "Bold Gambit",
    "Unexpected Ally",
];

pub struct SkillOptionGenerator<'a> {
    template: &'a ChallengeTemplate,
    difficulty: DifficultyTier,
    scaling: AppliedScaling,
}

impl<'a> SkillOptionGenerator<'a> {
    pub fn new(template: &'a ChallengeTemplate, difficulty: DifficultyTier, scaling: AppliedScaling) -> Self {
        Self {
            template,
            difficulty,
            scaling,
        }
    }

    fn base_dc(&self) -> i32 {
        self.difficulty.base_dc() + self.scaling.dc_adjustment()
    }

    /// Generate the full option list, topping it up to `minimum_solutions`
    /// (capped at `MAX_SOLUTIONS`)
    pub fn generate(&self, minimum_solutions: usize) -> Result<Vec<SkillOption>, CatalogError> {
        let minimum_solutions = minimum_solutions.min(MAX_SOLUTIONS);
        if self.template.primary_skills.is_empty() {
            return Err(CatalogError::EmptySkillList(self.template.theme));
        }

        let base = self.base_dc();
        let mut options: Vec<SkillOption> = Vec::new();

        for (index, skill) in self.template.primary_skills.iter().enumerate() {
            if contains(&options, skill) {
                continue;
            }
            let dc = base + PRIMARY_JITTER[index % PRIMARY_JITTER.len()];
            options.push(self.skilled_option(skill, SkillCategory::Primary, dc));
        }

        for skill in &self.template.secondary_skills {
            if contains(&options, skill) {
                continue;
            }
            options.push(
                self.skilled_option(skill, SkillCategory::Secondary, base + 1)
                    .with_usage_limit(LIMITED_USES),
            );
        }

        options.push(self.creative_option(base - 1));

        let mut improvised = IMPROVISED_APPROACHES.iter().map(|s| s.to_string());
        let mut synthesized = 0;
        while options.len() < minimum_solutions {
            synthesized += 1;
            let name = improvised
                .next()
                .unwrap_or_else(|| format!("Improvised Approach {}", synthesized));
            options.push(
                SkillOption::new(name.clone(), SkillCategory::Creative, base - 1)
                    .with_outcomes(
                        format!("{} pays off and the group gains ground.", name),
                        format!("{} falls apart at the worst moment.", name),
                    )
                    .with_usage_limit(1),
            );
        }

        Ok(options)
    }

    fn skilled_option(&self, skill: &str, category: SkillCategory, dc: i32) -> SkillOption {
        let synergies = affinities_for(skill);
        let alternatives: Vec<String> = synergies.iter().map(|s| s.skill.clone()).collect();
        let theme = self.template.theme.display_name().to_lowercase();

        let mut option = SkillOption::new(skill, category, dc)
            .with_outcomes(
                format!("Skillful {} moves the {} forward.", skill, theme),
                format!("The {} attempt falters and the {} slips further away.", skill, theme),
            )
            .with_alternatives(alternatives);
        option.synergies = synergies;
        option
    }

    fn creative_option(&self, dc: i32) -> SkillOption {
        let mut alternatives: Vec<String> = self
            .template
            .primary_skills
            .iter()
            .chain(self.template.secondary_skills.iter())
            .cloned()
            .collect();
        alternatives.push("Any skill with a convincing justification".to_string());

        SkillOption::new(CREATIVE_APPROACH, SkillCategory::Creative, dc)
            .with_outcomes(
                "The unorthodox plan works better than anyone expected.",
                "The improvised plan unravels, costing the group precious ground.",
            )
            .with_usage_limit(LIMITED_USES)
            .with_alternatives(alternatives)
    }
}

fn contains(options: &[SkillOption], skill: &str) -> bool {
    options.iter().any(|o| o.skill.eq_ignore_ascii_case(skill))
}
