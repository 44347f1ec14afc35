//! Configuration validation module
//!
//! Validation rules:
//! - data root non-empty
//! - sampling grid intervals positive and strides divide exactly
//! - contact lookahead > 0, rise_threshold > 0
//! - subject names unique and non-empty, each with at least one hop
//! - hop numbers unique per subject
//! - sink names unique and non-empty

use std::collections::HashSet;

use contracts::{ContractError, PipelineBlueprint};

/// Validate a PipelineBlueprint
///
/// Returns the first encountered error, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    validate_data(blueprint)?;
    blueprint.grid.validate()?;
    validate_contact(blueprint)?;
    validate_subjects(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

/// Validate data source settings
fn validate_data(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    if blueprint.data.root.trim().is_empty() {
        return Err(ContractError::config_validation(
            "data.root",
            "data root cannot be empty",
        ));
    }
    Ok(())
}

/// Validate contact detector settings
fn validate_contact(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let contact = &blueprint.contact;

    if contact.lookahead == 0 {
        return Err(ContractError::config_validation(
            "contact.lookahead",
            "lookahead must be > 0",
        ));
    }

    if !(contact.rise_threshold > 0.0) {
        return Err(ContractError::config_validation(
            "contact.rise_threshold",
            format!(
                "rise_threshold must be > 0, got {}",
                contact.rise_threshold
            ),
        ));
    }

    Ok(())
}

/// Validate subject list
fn validate_subjects(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    if blueprint.subjects.is_empty() {
        return Err(ContractError::config_validation(
            "subjects",
            "at least one subject is required",
        ));
    }

    let mut seen = HashSet::new();
    for subject in &blueprint.subjects {
        if subject.name.trim().is_empty() {
            return Err(ContractError::config_validation(
                "subjects[].name",
                "subject name cannot be empty",
            ));
        }

        if !seen.insert(&subject.name) {
            return Err(ContractError::config_validation(
                format!("subjects[name={}]", subject.name),
                "duplicate subject name",
            ));
        }

        if subject.hops.is_empty() {
            return Err(ContractError::config_validation(
                format!("subjects[name={}].hops", subject.name),
                "subject must list at least one hop",
            ));
        }

        let mut hop_seen = HashSet::new();
        for &hop in &subject.hops {
            if !hop_seen.insert(hop) {
                return Err(ContractError::config_validation(
                    format!("subjects[name={}].hops", subject.name),
                    format!("duplicate hop number {hop}"),
                ));
            }
        }
    }

    Ok(())
}

/// Validate sink configurations
fn validate_sinks(blueprint: &PipelineBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
        if !seen.insert(&sink.name) {
            return Err(ContractError::config_validation(
                format!("sinks[{idx}].name"),
                format!("duplicate sink name '{}'", sink.name),
            ));
        }
    }
    Ok(())
}
