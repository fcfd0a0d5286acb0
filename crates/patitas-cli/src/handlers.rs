//! Command handlers: load features, filter, render output.

use console::style;
use std::path::Path;

use patitas::{Feature, Platform, SuiteConfig, Tag, TagExpression};

use crate::commands::{CheckArgs, ListArgs, OutputFormat, TagsArgs};
use crate::error::{CliError, CliResult};

/// Validate the feature files of a directory.
///
/// Every file must deserialize, every tag must be a valid name, and
/// every scenario must have at least one step.
pub fn execute_check(args: &CheckArgs) -> CliResult<()> {
    let features = Feature::load_dir(&args.features)?;
    let problems = collect_problems(&features);

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_check_text(&args.features, &features, &problems));
        }
        OutputFormat::Json => {
            println!("{}", render_check_json(&features, &problems)?);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{} problem(s) found",
            problems.len()
        )))
    }
}

/// List the scenarios a platform's filter selects.
pub fn execute_list(args: &ListArgs) -> CliResult<()> {
    let features = Feature::load_dir(&args.features)?;
    let platform = Platform::from(args.platform);
    let mut config = SuiteConfig::for_platform("patitas list", platform)?;
    if let Some(expression) = &args.filter {
        config = config.with_filter(expression)?;
    }

    let selected = select(&features, &config.filter);
    match args.format {
        OutputFormat::Text => {
            println!(
                "{} scenario(s) selected by {}",
                style(selected.len()).bold(),
                style(config.filter.to_string()).cyan()
            );
            for (feature, scenario) in &selected {
                println!("  {} / {}", style(feature).dim(), scenario);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = selected
                .iter()
                .map(|(feature, scenario)| {
                    serde_json::json!({ "feature": feature, "scenario": scenario })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "platform": platform.as_str(),
                    "filter": config.filter.to_string(),
                    "selected": entries,
                }))
                .map_err(patitas::PatitasError::from)?
            );
        }
    }
    Ok(())
}

/// Parse a tag expression; optionally show which scenarios it selects.
pub fn execute_tags(args: &TagsArgs) -> CliResult<()> {
    let expression = TagExpression::parse(&args.expression)?;
    println!("{}", style(expression.to_string()).green());

    if let Some(dir) = &args.features {
        let features = Feature::load_dir(dir)?;
        for (feature, scenario) in select(&features, &expression) {
            println!("  {} / {}", style(feature).dim(), scenario);
        }
    }
    Ok(())
}

fn select(features: &[Feature], filter: &TagExpression) -> Vec<(String, String)> {
    features
        .iter()
        .flat_map(|feature| {
            feature.scenarios.iter().filter_map(move |scenario| {
                filter
                    .evaluate(&feature.effective_tags(scenario))
                    .then(|| (feature.feature.clone(), scenario.name.clone()))
            })
        })
        .collect()
}

fn collect_problems(features: &[Feature]) -> Vec<String> {
    let mut problems = Vec::new();
    for feature in features {
        for tag in &feature.tags {
            if Tag::parse(tag.name()).is_err() {
                problems.push(format!(
                    "{}: invalid feature tag {:?}",
                    feature.feature,
                    tag.name()
                ));
            }
        }
        for scenario in &feature.scenarios {
            if scenario.steps.is_empty() {
                problems.push(format!(
                    "{} / {}: scenario has no steps",
                    feature.feature, scenario.name
                ));
            }
            for tag in &scenario.tags {
                if Tag::parse(tag.name()).is_err() {
                    problems.push(format!(
                        "{} / {}: invalid tag {:?}",
                        feature.feature,
                        scenario.name,
                        tag.name()
                    ));
                }
            }
        }
    }
    problems
}

fn render_check_text(dir: &Path, features: &[Feature], problems: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Checked {} feature file(s) in {}\n",
        features.len(),
        dir.display()
    ));
    for feature in features {
        out.push_str(&format!(
            "  {} ({} scenario(s))\n",
            feature.feature,
            feature.scenario_count()
        ));
    }
    if problems.is_empty() {
        out.push_str(&format!("{}\n", style("All features valid").green()));
    } else {
        for problem in problems {
            out.push_str(&format!("  {} {problem}\n", style("problem:").red()));
        }
    }
    out
}

fn render_check_json(features: &[Feature], problems: &[String]) -> CliResult<String> {
    let entries: Vec<_> = features
        .iter()
        .map(|f| {
            serde_json::json!({
                "feature": f.feature,
                "scenarios": f.scenario_count(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "features": entries,
        "problems": problems,
        "valid": problems.is_empty(),
    }))
    .map_err(|e| CliError::Patitas(patitas::PatitasError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> Feature {
        Feature::from_yaml(
            r"
feature: Landing page
tags: [web]
scenarios:
  - name: Hero
    steps:
      - the hero section is displayed
  - name: Empty scenario
    tags: [pending]
    steps: []
",
        )
        .unwrap()
    }

    #[test]
    fn test_collect_problems_flags_empty_scenarios() {
        let problems = collect_problems(&[feature()]);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Empty scenario"));
    }

    #[test]
    fn test_collect_problems_flags_invalid_tags() {
        let feature = Feature::from_yaml(
            r#"
feature: Bad tags
tags: ["two words"]
scenarios:
  - name: S
    steps: [a step]
"#,
        )
        .unwrap();
        let problems = collect_problems(&[feature]);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("two words"));
    }

    #[test]
    fn test_select_applies_effective_tags() {
        let filter = TagExpression::parse("@web and not @pending").unwrap();
        let selected = select(&[feature()], &filter);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].1, "Hero");
    }

    #[test]
    fn test_render_check_json_valid_flag() {
        let json = render_check_json(&[feature()], &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["valid"], true);
        assert_eq!(parsed["features"][0]["scenarios"], 2);
    }
}
