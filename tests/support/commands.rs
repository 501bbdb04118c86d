//! Command helper methods for Test.

use super::{Test, PASSWORD};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a credkeep command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - CREDKEEP_HOME set to the temporary data directory
    /// - CREDKEEP_PASSWORD set to the test master password
    /// - NO_COLOR set so output is plain
    /// - Current directory set to the test working directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("credkeep").expect("failed to find credkeep binary");
        cmd.env("CREDKEEP_HOME", self.home.path());
        cmd.env("CREDKEEP_PASSWORD", PASSWORD);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("CREDKEEP_NEW_PASSWORD");
        cmd.env_remove("CREDKEEP_PROFILE");
        cmd.env_remove("CREDKEEP_LOG");
        cmd.env_remove("CREDKEEP_LOG_FORMAT");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run credkeep with arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run credkeep")
    }

    /// Shortcut for `credkeep profile new`.
    pub fn profile_new(&self) -> Output {
        self.run(&["profile", "new"])
    }

    /// Shortcut for `credkeep site add` with fields and tags.
    pub fn add(&self, name: &str, fields: &[&str], tags: &[&str]) -> Output {
        let mut args = vec!["site", "add", name];
        for field in fields {
            args.extend(["--field", *field]);
        }
        for tag in tags {
            args.extend(["--tag", *tag]);
        }
        self.run(&args)
    }

    /// Shortcut for `credkeep site get`.
    pub fn get(&self, name: &str, extra: &[&str]) -> Output {
        let mut args = vec!["site", "get", name];
        args.extend(extra);
        self.run(&args)
    }

    /// Shortcut for `credkeep site get --json --reveal --tags`.
    pub fn get_json(&self, name: &str) -> serde_json::Value {
        let output = self.get(name, &["--json", "--reveal", "--tags"]);
        super::assert_success(&output);
        super::stdout_json(&output)
    }

    /// Shortcut for `credkeep site list`.
    pub fn list(&self, extra: &[&str]) -> Output {
        let mut args = vec!["site", "list"];
        args.extend(extra);
        self.run(&args)
    }

    /// Site names from `credkeep site list --json`.
    pub fn list_names(&self, extra: &[&str]) -> Vec<String> {
        let mut args = vec!["--json"];
        args.extend(extra);
        let output = self.list(&args);
        super::assert_success(&output);
        super::stdout_json(&output)["sites"]
            .as_array()
            .expect("sites array")
            .iter()
            .map(|s| s["name"].as_str().expect("name").to_string())
            .collect()
    }
}
