//! End-to-end harness test: a full Huellitas mock DOM, real glue
//! packages, and a suite run per platform.

use std::time::Duration;

use patitas::{
    ElementHandle, Feature, LandingPage, MockDriver, NavItem, NavigationPage, Platform,
    ReportFormat, ReportPlugin, ScenarioStatus, StepRegistry, SuiteConfig, SuiteRunner,
};

const BASE_URL: &str = "https://huellitas.app/";

/// The landing page plus navigation bar, with the home item active.
fn huellitas_dom() -> MockDriver {
    let driver = MockDriver::new();
    driver.insert(
        ElementHandle::new("section")
            .with_test_id("landing.hero.section")
            .with_text("Bring them home"),
    );
    driver.insert(
        ElementHandle::new("h1")
            .with_test_id("landing.hero.title")
            .with_text("Find your lost pet"),
    );
    driver.insert(ElementHandle::new("input").with_test_id("landing.searchBar.input"));
    driver.insert(ElementHandle::new("button").with_test_id("landing.searchBar.action"));
    driver.insert(ElementHandle::new("a").with_test_id("landing.reportLost.action"));
    driver.insert(ElementHandle::new("a").with_test_id("landing.reportFound.action"));
    for title in ["Report sightings", "Scan QR tags", "Reunite families"] {
        driver.insert(ElementHandle::new("div").with_test_id("landing.featureCard.container"));
        driver.insert(
            ElementHandle::new("h3")
                .with_test_id("landing.featureCard.title")
                .with_text(title),
        );
        driver.insert(
            ElementHandle::new("span")
                .with_test_id("landing.featureCard.icon")
                .with_attribute("style", "background-color: rgb(233, 30, 99);"),
        );
    }
    driver.insert(ElementHandle::new("nav").with_test_id("navigation.bar.container"));
    for item in NavItem::ALL {
        let class = if item == NavItem::Home {
            "nav-item active"
        } else {
            "nav-item"
        };
        driver.insert(
            ElementHandle::new("a")
                .with_test_id(item.link_test_id().as_str())
                .with_text(item.id())
                .with_attribute("class", class),
        );
        driver.insert(ElementHandle::new("svg").with_test_id(item.icon_test_id().as_str()));
    }
    driver
}

fn glue() -> StepRegistry {
    let mut registry = StepRegistry::new();
    registry
        .register("pages::landing", "the visitor opens the landing page", |d, _| {
            LandingPage::new(d).open(BASE_URL)
        })
        .unwrap();
    registry
        .register("pages::landing", "the hero section is displayed", |d, _| {
            assert!(LandingPage::new(d).is_hero_displayed());
            Ok(())
        })
        .unwrap();
    registry
        .register(
            "pages::landing",
            "the visitor searches for \"(.+)\"",
            |d, args| LandingPage::new(d).search_for(&args[0]),
        )
        .unwrap();
    registry
        .register("pages::landing", "there are (\\d+) feature cards", |d, args| {
            let expected: usize = args[0].parse().unwrap();
            assert_eq!(LandingPage::new(d).feature_card_count(), expected);
            Ok(())
        })
        .unwrap();
    registry
        .register(
            "pages::navigation",
            "the \"(\\w+)\" navigation item is active",
            |d, args| {
                let active = NavigationPage::new(d)
                    .active_item()
                    .map(|i| i.id().to_string());
                assert_eq!(active.as_deref(), Some(args[0].as_str()));
                Ok(())
            },
        )
        .unwrap();
    registry
        .register("pages::navigation", "every navigation item has an icon", |d, _| {
            assert!(NavigationPage::new(d).all_items_have_icons());
            Ok(())
        })
        .unwrap();
    registry
        .register(
            "pages::navigation",
            "the visitor clicks the \"(\\w+)\" navigation item",
            |d, args| {
                let page =
                    NavigationPage::new(d).with_timeout(Duration::from_millis(200));
                for item in NavItem::ALL {
                    if item.id() == args[0] {
                        return page.click(item);
                    }
                }
                panic!("unknown navigation item {:?}", args[0]);
            },
        )
        .unwrap();
    registry
}

fn features() -> Vec<Feature> {
    vec![
        Feature::from_yaml(
            r#"
feature: Landing page
tags: [web, android, ios]
scenarios:
  - name: Hero and feature cards are displayed
    steps:
      - the visitor opens the landing page
      - the hero section is displayed
      - there are 3 feature cards
  - name: Searching for a pet
    tags: [web]
    steps:
      - the visitor opens the landing page
      - the visitor searches for "tabby cat"
  - name: Old promo banner
    tags: [legacy]
    steps:
      - the promo banner is displayed
"#,
        )
        .unwrap(),
        Feature::from_yaml(
            r#"
feature: Navigation
tags: [web, android]
scenarios:
  - name: Home is active on the landing page
    steps:
      - the visitor opens the landing page
      - the "home" navigation item is active
      - every navigation item has an icon
  - name: Visiting the contact page
    steps:
      - the visitor opens the landing page
      - the visitor clicks the "contact" navigation item
  - name: Account deep links
    tags: [pending-web]
    steps:
      - the visitor opens the landing page
      - the visitor clicks the "account" navigation item
"#,
        )
        .unwrap(),
    ]
}

fn runner_for(platform: Platform, reports: Vec<ReportPlugin>) -> SuiteRunner {
    let config = SuiteConfig::for_platform("Huellitas E2E", platform)
        .unwrap()
        .with_base_url(BASE_URL)
        .with_reports(reports);
    SuiteRunner::new(config, glue())
}

#[test]
fn web_suite_runs_green() {
    let runner = runner_for(Platform::Web, Vec::new());
    let driver = huellitas_dom();
    let report = runner.run(&features(), &driver).unwrap();

    // legacy and pending-web scenarios are filtered out
    assert_eq!(report.total_count(), 6);
    assert_eq!(report.passed_count(), 4);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.skipped_count(), 2);
    assert!(report.all_passed());

    assert!(driver.was_called("navigate:https://huellitas.app/"));
    assert!(driver.was_called("type:test-id=landing.searchBar.input:tabby cat"));
    assert!(driver.was_called("click:test-id=navigation.contact.link"));
}

#[test]
fn legacy_scenarios_never_execute_on_any_platform() {
    for platform in [Platform::Web, Platform::Android, Platform::Ios] {
        let runner = runner_for(platform, Vec::new());
        let driver = huellitas_dom();
        let report = runner.run(&features(), &driver).unwrap();
        let legacy = report
            .results
            .iter()
            .find(|r| r.scenario == "Old promo banner")
            .unwrap();
        assert_eq!(legacy.status, ScenarioStatus::Skipped, "{platform}");
        assert!(legacy.steps.is_empty(), "{platform}");
    }
}

#[test]
fn ios_suite_excludes_the_navigation_feature() {
    // Navigation is tagged [web, android] only; the landing feature's
    // [web, android, ios] tags flow into both of its selected scenarios.
    let runner = runner_for(Platform::Ios, Vec::new());
    let features = features();
    let selected = runner.select(&features);
    let names: Vec<_> = selected.iter().map(|(_, s)| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Hero and feature cards are displayed",
            "Searching for a pet",
        ]
    );
}

#[test]
fn dry_run_finds_no_binding_problems() {
    let runner = runner_for(Platform::Web, Vec::new());
    assert!(runner.dry_run(&features()).is_empty());
}

#[test]
fn reports_are_written_in_all_three_formats() {
    let dir = tempfile::tempdir().unwrap();
    let reports = vec![
        ReportPlugin::new(ReportFormat::Html, dir.path().join("report.html")),
        ReportPlugin::new(ReportFormat::Json, dir.path().join("report.json")),
        ReportPlugin::new(ReportFormat::JUnit, dir.path().join("report.xml")),
    ];
    let runner = runner_for(Platform::Web, reports);
    let driver = huellitas_dom();
    let report = runner.run(&features(), &driver).unwrap();

    let html = std::fs::read_to_string(dir.path().join("report.html")).unwrap();
    assert!(html.contains("Huellitas E2E"));
    assert!(html.contains("Searching for a pet"));

    let json = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["suite"], "Huellitas E2E");
    assert_eq!(parsed["platform"], "web");
    assert_eq!(parsed["run_id"], report.run_id.to_string());

    let xml = std::fs::read_to_string(dir.path().join("report.xml")).unwrap();
    assert!(xml.contains(r#"<testsuite name="Huellitas E2E" tests="6" failures="0" skipped="2""#));
}

#[test]
fn failing_verification_is_reported_not_raised() {
    let runner = runner_for(Platform::Web, Vec::new());
    let driver = huellitas_dom();
    driver.mark_stale("landing.hero.section");
    let report = runner.run(&features(), &driver).unwrap();

    // "the hero section is displayed" asserts on a defaulted read
    let hero = report
        .results
        .iter()
        .find(|r| r.scenario == "Hero and feature cards are displayed")
        .unwrap();
    assert_eq!(hero.status, ScenarioStatus::Failed);
    assert!(!report.all_passed());
}
