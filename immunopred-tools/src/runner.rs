//! Command-line construction and execution of external predictors

use immunopred_core::{ImmunopredError, ImmunopredResult};
use std::path::Path;
use std::process::{Command, Output};

/// A method's command line with `{peptides}`, `{alleles}`, `{out}` and
/// `{options}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    template: String,
}

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Leading executable token
    pub fn executable(&self) -> &str {
        self.template.split_whitespace().next().unwrap_or_default()
    }

    /// Swap the leading executable token; the rest of the template is untouched
    pub fn with_executable(&self, executable: &str) -> Self {
        let trimmed = self.template.trim_start();
        let rest = &trimmed[self.executable().len()..];
        Self {
            template: format!("{}{}", executable, rest),
        }
    }

    /// Substitute all placeholders. `options` is inserted verbatim.
    pub fn render(&self, peptides: &Path, alleles: &str, out: &Path, options: Option<&str>) -> String {
        self.template
            .replace("{peptides}", &peptides.to_string_lossy())
            .replace("{alleles}", alleles)
            .replace("{out}", &out.to_string_lossy())
            .replace("{options}", options.unwrap_or(""))
    }
}

/// Run a rendered command line through `bash -o pipefail -c`, blocking
/// until it exits.
///
/// Templates contain pipes and redirections, so a shell is required. With
/// pipefail a predictor that fails upstream of a filter still fails the
/// command. A non-zero exit (or death by signal) is a `SubprocessExecution`
/// error that carries the command and its stderr.
pub fn run_shell(command: &str) -> ImmunopredResult<Output> {
    tracing::debug!("Running: {}", command);

    let output = Command::new("bash")
        .args(["-o", "pipefail", "-c"])
        .arg(command).output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ImmunopredError::SubprocessExecution {
            command: command.to_string(),
            status: output.status.code(),
            stderr,
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = CommandTemplate::new("netMHC -p {peptides} -a {alleles} -x {out} {options}");
        let cmd = template.render(
            &PathBuf::from("/tmp/in.pep"),
            "HLA-A02:01,HLA-A01:01",
            &PathBuf::from("/tmp/out.xls"),
            Some("-s"),
        );
        assert_eq!(
            cmd,
            "netMHC -p /tmp/in.pep -a HLA-A02:01,HLA-A01:01 -x /tmp/out.xls -s"
        );
    }

    #[test]
    fn test_render_without_options_leaves_blank() {
        let template = CommandTemplate::new("netctlpan -f {peptides} -a {alleles} {options} > {out}");
        let cmd = template.render(Path::new("in"), "HLA-A02:01", Path::new("out"), None);
        assert_eq!(cmd, "netctlpan -f in -a HLA-A02:01  > out");
    }

    #[test]
    fn test_with_executable_replaces_only_first_token() {
        // the executable name also appears later in the template
        let template = CommandTemplate::new("netMHC -p {peptides} -x {out} {options} | grep netMHC");
        let replaced = template.with_executable("/opt/bin/netMHC-3.4");

        assert_eq!(
            replaced.as_str(),
            "/opt/bin/netMHC-3.4 -p {peptides} -x {out} {options} | grep netMHC"
        );
        assert_eq!(replaced.executable(), "/opt/bin/netMHC-3.4");
    }

    #[test]
    fn test_run_shell_success_captures_stdout() {
        let output = run_shell("echo predicted").unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "predicted");
    }

    #[test]
    fn test_run_shell_failure_reports_stderr() {
        let err = run_shell("echo 'allele not found' >&2; exit 3").unwrap_err();
        match err {
            ImmunopredError::SubprocessExecution {
                command,
                status,
                stderr,
            } => {
                assert!(command.contains("exit 3"));
                assert_eq!(status, Some(3));
                assert_eq!(stderr, "allele not found");
            }
            other => panic!("Expected SubprocessExecution, got {:?}", other),
        }
    }

    #[test]
    fn test_run_shell_failure_upstream_of_pipe() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        let cmd = format!(
            r##"(echo 'A0201 SIINFEKL 0.211'; echo segfault >&2; exit 7) | grep -v "#" > {}"##,
            out.display()
        );

        let err = run_shell(&cmd).unwrap_err();
        match err {
            ImmunopredError::SubprocessExecution { status, stderr, .. } => {
                assert_eq!(status, Some(7));
                assert_eq!(stderr, "segfault");
            }
            other => panic!("Expected SubprocessExecution, got {:?}", other),
        }
        // rows reached the filter before the failure
        assert!(std::fs::read_to_string(&out).unwrap().contains("SIINFEKL"));
    }
}
