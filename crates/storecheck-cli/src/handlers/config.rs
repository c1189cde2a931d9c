//! Config command handler

use storecheck::{SessionPlan, SuiteConfig};

use crate::{CliError, CliResult, ConfigArgs, ConfigFormat};

/// Execute the config command
pub fn execute_config(config: &SuiteConfig, args: &ConfigArgs) -> CliResult<()> {
    print!("{}", render_config(config, args.format)?);
    if args.plan {
        let plan = SessionPlan::from_env(config)?;
        println!("{}", render_plan(&plan));
    }
    Ok(())
}

/// Serialize the resolved configuration
pub fn render_config(config: &SuiteConfig, format: ConfigFormat) -> CliResult<String> {
    match format {
        ConfigFormat::Yaml => serde_yaml_ng::to_string(config).map_err(CliError::render),
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map(|json| json + "\n")
            .map_err(CliError::render),
    }
}

/// One-line summary of where a session would be started
#[must_use]
pub fn render_plan(plan: &SessionPlan) -> String {
    let browser = plan
        .capabilities()
        .get("browserName")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    format!(
        "session: {} {} at {}",
        plan.run_mode(),
        browser,
        plan.endpoint()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use storecheck::RunMode;

    #[test]
    fn test_yaml_round_trips_through_loader() {
        let config = SuiteConfig::default().with_api_base_url("https://bstackdemo.com/api");
        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("api_base_url: https://bstackdemo.com/api"));
        assert_eq!(SuiteConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_json_output() {
        let json = render_config(&SuiteConfig::default(), ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["run_mode"], "local");
        assert_eq!(value["browser"], "chrome");
    }

    #[test]
    fn test_plan_hides_credentials() {
        let config = SuiteConfig::default().with_run_mode(RunMode::BrowserStack);
        let plan = SessionPlan::resolve(&config, |key| match key {
            "BROWSERSTACK_USERNAME" => Some("alice".into()),
            "BROWSERSTACK_ACCESS_KEY" => Some("s3cret".into()),
            _ => None,
        })
        .unwrap();
        let line = render_plan(&plan);
        assert_eq!(
            line,
            "session: browserstack chrome at https://hub-cloud.browserstack.com/wd/hub"
        );
        assert!(!line.contains("s3cret"));
    }
}
