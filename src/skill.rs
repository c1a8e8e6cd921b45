// ABOUTME: Trainer persona (skill) loader and athlete profile resolution
// ABOUTME: Strips YAML frontmatter, finds the USER_PROFILE_PATH directive, composes the user message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::{Path, PathBuf};

use pierre_core::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Frontmatter delimiter
const FRONTMATTER_DELIMITER: &str = "---";

/// Directive naming the athlete profile, relative to the skill file
const PROFILE_DIRECTIVE_PATTERN: &str = r"USER_PROFILE_PATH:\s*(.+)";

/// YAML frontmatter of a skill file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFrontmatter {
    /// Skill identifier
    #[serde(default)]
    pub name: Option<String>,
    /// One-line description
    #[serde(default)]
    pub description: Option<String>,
}

/// A loaded trainer persona
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerSkill {
    /// Parsed frontmatter, default when absent or unparseable
    pub frontmatter: SkillFrontmatter,
    /// System instruction sent to the model
    pub instructions: String,
    /// Athlete profile location named by the skill, if any
    pub profile_path: Option<PathBuf>,
}

/// Split a skill document into frontmatter text and body
///
/// Without a leading `---` block the whole document is the body.
#[must_use]
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(after_first) = content.strip_prefix(FRONTMATTER_DELIMITER) else {
        return (None, content.trim());
    };
    after_first
        .split_once(FRONTMATTER_DELIMITER)
        .map_or((None, content.trim()), |(yaml, body)| {
            (Some(yaml), body.trim())
        })
}

/// Find the athlete profile directive in a skill body
///
/// # Errors
///
/// Returns an internal error if the directive pattern fails to compile
pub fn profile_directive(body: &str) -> AppResult<Option<String>> {
    let pattern = Regex::new(PROFILE_DIRECTIVE_PATTERN)
        .map_err(|e| AppError::internal(format!("Invalid profile directive pattern: {e}")))?;
    Ok(pattern
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str().trim().to_owned())
        .filter(|path| !path.is_empty()))
}

/// Parse skill content; `skill_dir` resolves a relative profile path
///
/// # Errors
///
/// Returns an internal error if the directive pattern fails to compile
pub fn parse_skill(content: &str, skill_dir: &Path) -> AppResult<TrainerSkill> {
    let (yaml, body) = split_frontmatter(content);

    let frontmatter = yaml.map_or_else(SkillFrontmatter::default, |yaml| {
        serde_yaml::from_str::<Option<SkillFrontmatter>>(yaml)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unparseable skill frontmatter");
                None
            })
            .unwrap_or_default()
    });

    let profile_path = profile_directive(body)?.map(|relative| skill_dir.join(relative));

    Ok(TrainerSkill {
        frontmatter,
        instructions: body.to_owned(),
        profile_path,
    })
}

/// Load the trainer skill file
///
/// # Errors
///
/// Returns an error if the file cannot be read
pub fn load_skill(path: &Path) -> AppResult<TrainerSkill> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::input_unreadable(format!(
            "Failed to read personal trainer skill {}: {e}",
            path.display()
        ))
    })?;
    let skill_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let skill = parse_skill(&content, skill_dir)?;
    info!(
        name = skill.frontmatter.name.as_deref().unwrap_or("unnamed"),
        chars = skill.instructions.len(),
        "Loaded personal trainer skill"
    );
    Ok(skill)
}

/// Load the athlete profile named by the skill
///
/// A missing directive or file is a warning, not an error.
///
/// # Errors
///
/// Returns an error if the profile exists but cannot be read
pub fn load_profile(skill: &TrainerSkill) -> AppResult<Option<String>> {
    let Some(path) = skill.profile_path.as_deref().filter(|path| path.exists()) else {
        warn!("No user profile path found in skill file or the file does not exist");
        return Ok(None);
    };

    let profile = fs::read_to_string(path).map_err(|e| {
        AppError::input_unreadable(format!("Failed to read user profile {}: {e}", path.display()))
    })?;
    let profile = profile.trim().to_owned();
    debug!(path = %path.display(), chars = profile.len(), "Loaded user profile");
    Ok((!profile.is_empty()).then_some(profile))
}

/// Combine the athlete profile with the training data prompt
#[must_use]
pub fn compose_user_message(profile: Option<&str>, training_data: &str) -> String {
    match profile {
        Some(profile) => format!(
            "# Athlete Profile\n\n{profile}\n\n---\n\n# Training Data\n\n{training_data}"
        ),
        None => training_data.to_owned(),
    }
}
