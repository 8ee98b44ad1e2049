//! Built-in module definitions.
//!
//! Each energy system lives in its own file as static tables; `builtin_drafts`
//! turns them into unvalidated drafts for the registry to check.

mod biomass;
mod hydro;
mod solar;
mod wind;

use crate::model::{
    AnalysisSection, AssemblyHint, ComponentRecord, HintStage, ImageRef, ImageRefError,
    ModuleDraft, SpecLine,
};

/// `(key, name, description, specs, function, image)`
type ComponentRow = (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str);

/// Drafts for all four modules in curriculum order.
///
/// # Errors
///
/// Returns `ImageRefError` if a table carries an invalid image path.
pub fn builtin_drafts() -> Result<Vec<ModuleDraft>, ImageRefError> {
    Ok(vec![
        solar::draft()?,
        wind::draft()?,
        hydro::draft()?,
        biomass::draft()?,
    ])
}

fn components(rows: &[ComponentRow]) -> Result<Vec<ComponentRecord>, ImageRefError> {
    rows.iter()
        .map(|(key, name, description, specs, function, image)| {
            Ok::<_, ImageRefError>(ComponentRecord::new(
                *key,
                *name,
                *description,
                *specs,
                *function,
                ImageRef::new(image)?,
            ))
        })
        .collect()
}

fn spec_lines(rows: &[(&str, &str)]) -> Vec<SpecLine> {
    rows.iter()
        .map(|(label, value)| SpecLine {
            label: (*label).to_string(),
            value: (*value).to_string(),
        })
        .collect()
}

fn strings(rows: &[&str]) -> Vec<String> {
    rows.iter().map(|s| (*s).to_string()).collect()
}

fn hint(
    stages: &[(&str, &str)],
    flow: &str,
    retry_tips: &[&str],
    key_principle: &str,
) -> AssemblyHint {
    AssemblyHint {
        stages: stages
            .iter()
            .map(|(stage, question)| HintStage {
                stage: (*stage).to_string(),
                question: (*question).to_string(),
            })
            .collect(),
        flow: flow.to_string(),
        retry_tips: strings(retry_tips),
        key_principle: key_principle.to_string(),
    }
}

fn analysis(rows: &[(&str, &str)]) -> Vec<AnalysisSection> {
    rows.iter()
        .map(|(title, body)| AnalysisSection {
            title: (*title).to_string(),
            body: (*body).to_string(),
        })
        .collect()
}
